use std::fmt;

/// The steps of a pipeline run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Locate,
    Convert,
    Relocate,
    MapChannels,
    Plot,
}

impl Stage {
    pub const COUNT: usize = 5;

    pub fn index(&self) -> usize {
        match self {
            Stage::Locate => 0,
            Stage::Convert => 1,
            Stage::Relocate => 2,
            Stage::MapChannels => 3,
            Stage::Plot => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Locate => "Locating source",
            Stage::Convert => "Converting",
            Stage::Relocate => "Relocating",
            Stage::MapChannels => "Mapping channels",
            Stage::Plot => "Plotting",
        };
        write!(f, "{name}")
    }
}

/// Progress message sent from the pipeline to whoever is watching (typically the CLI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageStatus {
    pub stage: Stage,
    pub finished: bool,
}

impl StageStatus {
    pub fn new(stage: Stage, finished: bool) -> Self {
        Self { stage, finished }
    }

    /// Fraction of the run that is complete
    pub fn progress(&self) -> f32 {
        let done = self.stage.index() + usize::from(self.finished);
        done as f32 / Stage::COUNT as f32
    }
}
