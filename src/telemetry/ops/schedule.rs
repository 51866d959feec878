use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Schedule;

#[derive(Copy, Clone, Debug)]
pub enum Phase { ReadCsv, Cron }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::ReadCsv => "read_csv", Phase::Cron => "cron" } }
    fn span(&self) -> Span { match self { Phase::ReadCsv => info_span!("read_csv"), Phase::Cron => info_span!("cron") } }
}

impl OpMarker for Schedule {
    const NAME: &'static str = "schedule";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("schedule") }
}
