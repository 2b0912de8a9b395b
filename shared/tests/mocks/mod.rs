#![allow(dead_code)]

pub mod invoker;
pub mod model;
pub mod transcripts;
