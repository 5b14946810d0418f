/*
 * Device I/O Abstractions
 *
 * This module contains the traits and error codes shared between the host
 * simulation and the driver shims. It is the seam the two sides meet at:
 * the host only ever sees trait objects, the shims only ever see their
 * own callback arguments.
 */

pub mod device;
