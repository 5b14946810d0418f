/*
 * Logging Utilities
 *
 * This module contains the logging infrastructure for the simulation,
 * providing structured log output and an inspectable journal of recent
 * lines. The journal matters more than the output here: log lines are
 * the only observable side effect most of the shim callbacks have.
 */

pub mod journal;
pub mod logger;
