pub(crate) mod create_post;
pub(crate) mod post_list;
pub(crate) mod shell;
