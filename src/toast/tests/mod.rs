//! Test modules for the toast controller
//!
//! Every suite drives a [`Controller`](crate::toast::Controller) over the
//! recording renderer in `support`, feeding UI events by hand.

mod support;
