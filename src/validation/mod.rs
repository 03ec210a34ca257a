//! Submission Validation Module
//!
//! Turns an untyped JSON request body into a typed `Submission`, or explains why it can't.
//!
//! Rules are checked in a fixed order (name, age, gender, experience, goals, frequency)
//! and the first failing rule is the one reported back to the client.

pub mod validator;
