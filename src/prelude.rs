//! Internal prelude for the logging facade.

pub(crate) use crate::observability::{log_debug as debug, log_info as info, log_warn as warn};
