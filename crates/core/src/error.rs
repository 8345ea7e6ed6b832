use thiserror::Error;

use crate::model::attempt::AttemptStateError;
use crate::model::auth::AuthError;
use crate::model::job::JobError;
use crate::model::profile::ProfileError;
use crate::model::question::AnswerError;
use crate::model::skill::SkillError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Attempt(#[from] AttemptStateError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Job(#[from] JobError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Skill(#[from] SkillError),
}
