mod post;

pub use post::{
    validate_fields, BlogPost, NewPost, PostChanges, PostDraft, PostFilter, ValidationError,
    AUTHOR_MAX_LEN, SUMMARY_MAX_LEN, TITLE_MAX_LEN,
};
