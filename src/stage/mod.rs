//! Stream stage: progressive detection, field scheduling, judder retiming, and delivery to a sink.

pub(crate) mod opts;
pub(crate) mod post;
pub(crate) mod session;
pub(crate) mod sink;
