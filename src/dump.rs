use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::corpus::{EntityIndex, Visibility, load_corpus};
use crate::graph::{
    CANVAS_WIDTH, DrawCommand, EntityKey, GraphEvent, GraphState, JoinStrategy, RenderSink, render,
};

/// Writes each draw command as one JSON object per line.
struct JsonLinesSink<W: Write> {
    out: W,
    error: Option<anyhow::Error>,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            error: None,
            written: 0,
        }
    }

    fn write_command(&mut self, command: &DrawCommand) -> Result<()> {
        serde_json::to_writer(&mut self.out, command).context("failed to encode draw command")?;
        writeln!(self.out).context("failed to write draw command")?;
        Ok(())
    }

    fn finish(mut self) -> Result<usize> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.out.flush().context("failed to flush draw commands")?;
        Ok(self.written)
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn submit(&mut self, command: DrawCommand) {
        if self.error.is_some() {
            return;
        }
        match self.write_command(&command) {
            Ok(()) => self.written += 1,
            Err(error) => self.error = Some(error),
        }
    }
}

pub fn run(
    data_dir: &Path,
    join: JoinStrategy,
    visibility: Visibility,
    select: Option<EntityKey>,
) -> Result<()> {
    let corpus = load_corpus(data_dir)?;
    let state = scene(EntityIndex::build(&corpus.mentions), join, visibility, select);

    let stdout = io::stdout();
    let mut sink = JsonLinesSink::new(BufWriter::new(stdout.lock()));
    render(&state, CANVAS_WIDTH, &mut sink);
    let written = sink.finish()?;

    tracing::info!(commands = written, "dumped render commands");
    Ok(())
}

fn scene(
    index: EntityIndex,
    join: JoinStrategy,
    visibility: Visibility,
    select: Option<EntityKey>,
) -> GraphState {
    let mut state = GraphState::new(join, visibility).handle_event(GraphEvent::DataLoaded(index));

    if let Some(key) = select {
        state = state.handle_event(GraphEvent::Click(key.clone()));
        match state.details() {
            Some(details) => {
                tracing::info!(?key, files = details.files.len(), "selected entity");
            }
            None => tracing::warn!(?key, "selection is not a visible entity; dumping idle scene"),
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Category, EntityMention};

    fn index() -> EntityIndex {
        EntityIndex::build(&[
            EntityMention::new("f1", "Alice", "PERSON"),
            EntityMention::new("f1", "Paris", "GPE"),
            EntityMention::new("f2", "Bob", "PERSON"),
        ])
    }

    #[test]
    fn writes_one_json_line_per_command() {
        let state = scene(index(), JoinStrategy::Indexed, Visibility::default(), None);
        let mut sink = JsonLinesSink::new(Vec::new());
        render(&state, CANVAS_WIDTH, &mut sink);
        let written = sink.written;
        let out = String::from_utf8(sink.out).unwrap();

        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), written);
        // canvas, four labels, three boxes, one link
        assert_eq!(written, 9);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("kind").is_some());
        }
    }

    #[test]
    fn selection_marks_dimmed_boxes() {
        let select = EntityKey::new(Category::Who, "Alice");
        let state = scene(index(), JoinStrategy::Scan, Visibility::default(), Some(select));
        let mut commands = Vec::new();
        render(&state, CANVAS_WIDTH, &mut commands);

        let bob = commands
            .iter()
            .find_map(|command| match command {
                DrawCommand::EntityBox { key, emphasis, .. } if key.entity == "Bob" => {
                    Some(*emphasis)
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(serde_json::to_string(&bob).unwrap(), r#""dimmed""#);
    }

    #[test]
    fn unknown_selection_dumps_idle_scene() {
        let select = EntityKey::new(Category::Who, "Nobody");
        let state = scene(index(), JoinStrategy::Indexed, Visibility::default(), Some(select));

        assert!(state.selected_key().is_none());
    }

    #[test]
    fn finish_reports_write_failures() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let state = scene(index(), JoinStrategy::Indexed, Visibility::default(), None);
        let mut sink = JsonLinesSink::new(Broken);
        render(&state, CANVAS_WIDTH, &mut sink);

        assert!(sink.finish().is_err());
    }
}
