/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Visits on graphs.
//!
//! The [depth-first visit](depth_first) reports [events](depth_first::Event)
//! to a callback returning a `ControlFlow<E, ()>`, where `E` is a type
//! parameter of the visit method: for example, `E` might be
//! [`StoppedWhenDone`] when completing early, [`Interrupted`] when
//! interrupted, or [`Infallible`](std::convert::Infallible) if the visit
//! cannot be interrupted.
//!
//! If a callback returns a [`Break`](std::ops::ControlFlow::Break), the visit
//! is interrupted and the [`Break`](std::ops::ControlFlow::Break) value
//! becomes the return value of the visit method; for uninterruptible visits
//! we suggest the [`no-break`](https://crates.io/crates/no-break) crate and
//! its
//! [`continue_value_no_break`](no_break::NoBreak::continue_value_no_break)
//! method on the result to let type inference run smoothly.
//!
//! Note that an interruption does not necessarily denote an error condition
//! (see, e.g., [`StoppedWhenDone`]).
//!
//! Visits provide a `reset` method that makes it possible to reuse them.

pub mod depth_first;

use thiserror::Error;

#[derive(Error, Debug)]
/// The visit was interrupted.
#[error("The visit was interrupted")]
pub struct Interrupted;

#[derive(Error, Debug)]
/// The result of the visit was computed without completing the visit; for
/// example, during an acyclicity test a single arc pointing at the visit path
/// is sufficient to compute the result.
#[error("Stopped when done")]
pub struct StoppedWhenDone;
