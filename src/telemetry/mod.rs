pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use std::marker::PhantomData;
use std::time::Instant;

use ctx::{LogCtx, OpMarker};

fn new_ctx<O: OpMarker>() -> LogCtx<O> { LogCtx { json: config::logs_are_json(), started: Instant::now(), _marker: PhantomData } }

pub fn check() -> LogCtx<ops::check::Check> { new_ctx() }
pub fn schedule() -> LogCtx<ops::schedule::Schedule> { new_ctx() }
