use std::io::Write;

use crate::{
    error::{GraphanimError, GraphanimResult},
    surface::{RenderSurface, SceneSpec, TransitionBatch},
};

/// Serializes the driver's command stream as JSON lines. This is the
/// machine-readable animation script an external renderer replays; every
/// line is one command, in playback order.
pub struct ScriptSurface<W: Write> {
    out: W,
    commands: usize,
}

#[derive(serde::Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
enum ScriptCommand<'a> {
    Init { scene: &'a SceneSpec },
    Transition(&'a TransitionBatch),
    Finish { hold_secs: f64 },
}

impl<W: Write> ScriptSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, commands: 0 }
    }

    pub fn commands_written(&self) -> usize {
        self.commands
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, command: &ScriptCommand<'_>) -> GraphanimResult<()> {
        let line = serde_json::to_string(command)
            .map_err(|e| GraphanimError::serde(format!("script command: {e}")))?;
        writeln!(self.out, "{line}")
            .map_err(|e| GraphanimError::surface(format!("script write: {e}")))?;
        self.commands += 1;
        Ok(())
    }
}

impl<W: Write> RenderSurface for ScriptSurface<W> {
    fn init(&mut self, scene: &SceneSpec) -> GraphanimResult<()> {
        self.write(&ScriptCommand::Init { scene })
    }

    fn transition(&mut self, batch: &TransitionBatch) -> GraphanimResult<()> {
        self.write(&ScriptCommand::Transition(batch))
    }

    fn finish(&mut self, hold_secs: f64) -> GraphanimResult<()> {
        self.write(&ScriptCommand::Finish { hold_secs })?;
        self.out
            .flush()
            .map_err(|e| GraphanimError::surface(format!("script flush: {e}")))
    }
}
