pub mod post_statuses;
