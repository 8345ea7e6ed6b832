#![forbid(unsafe_code)]

pub mod backend;
pub mod http;
pub mod memory;

pub use backend::{
    ApiError, AssessmentApi, AttemptPlan, AuthApi, Backend, CandidateApi, NextQuestion,
    RecruiterApi,
};
pub use http::HttpBackend;
pub use memory::{InMemoryBackend, ScriptedQuestion};
