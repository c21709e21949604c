pub mod activity;
pub mod participant;
pub mod signup;
