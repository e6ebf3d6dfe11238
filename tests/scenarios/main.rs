//! Scenario-based tests for seqpipe

mod helpers;

mod end_to_end;
mod no_result;
