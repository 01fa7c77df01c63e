//! Schema of the revision log table, applied in whichever database holds a log.

pub mod migrations;
