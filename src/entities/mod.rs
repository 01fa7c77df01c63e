pub mod revision_log;

pub use revision_log::{
    ActiveModel as RevisionLogActiveModel, Column as RevisionLogColumn,
    Entity as RevisionLogEntity,
};
