use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Check;

#[derive(Copy, Clone, Debug)]
pub enum Phase { LoadTables, Detect, Deliver }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::LoadTables => "load_tables",
        Phase::Detect => "detect",
        Phase::Deliver => "deliver",
    }}
    fn span(&self) -> Span { match self {
        Phase::LoadTables => info_span!("load_tables"),
        Phase::Detect => info_span!("detect"),
        Phase::Deliver => info_span!("deliver"),
    }}
}

impl OpMarker for Check {
    const NAME: &'static str = "check";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("check") }
}
