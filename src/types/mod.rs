pub mod comment;
pub mod commit;
pub mod full_commit;
pub mod repo_id;
