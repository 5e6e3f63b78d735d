//! Sheet drafts.

pub mod draft;
