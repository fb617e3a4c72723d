/// Model info panel printed to the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use meshfit_core::{
    compute_stats, Error, MeshStats, Model, ModelFormat, Normalization, Normalizer,
};

/// Everything shown for one loaded model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReport {
    pub name: Option<String>,
    pub format: ModelFormat,
    pub mesh_count: usize,
    pub stats: MeshStats,
    /// `None` when the model has no vertices.
    pub normalization: Option<Normalization>,
}

impl ModelReport {
    pub fn new(format: ModelFormat, model: &Model, normalizer: &Normalizer) -> Self {
        let stats = compute_stats(model);
        let normalization = match normalizer.normalize(model) {
            Ok(normalization) => Some(normalization),
            Err(Error::EmptyGeometry) => {
                log::warn!("Model has no vertices; skipping normalization");
                None
            }
            Err(err) => {
                log::warn!("Normalization failed: {}", err);
                None
            }
        };

        Self {
            name: model.name.clone(),
            format,
            mesh_count: model.mesh_count(),
            stats,
            normalization,
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetForegroundColor(Color::Yellow))?;
        writer.queue(Print("Model Statistics\n"))?;
        writer.queue(ResetColor)?;

        let display = self.stats.rounded();
        let mut rows = vec![("Format", self.format.to_string())];
        if let Some(name) = &self.name {
            rows.push(("Name", name.clone()));
        }
        rows.push(("Meshes", self.mesh_count.to_string()));
        rows.push(("Vertices", display.vertices.to_string()));
        rows.push(("Faces", display.faces.to_string()));
        rows.push(("Edges", display.edges.to_string()));

        match &self.normalization {
            Some(n) => {
                rows.push(("Bounds min", format_triple(n.bounds.min.coords.as_slice())));
                rows.push(("Bounds max", format_triple(n.bounds.max.coords.as_slice())));
                rows.push(("Radius", format!("{:.4}", n.radius)));
                rows.push(("Translation", format_triple(n.transform.translation.as_slice())));
                rows.push(("Scale", format!("{:.4}", n.transform.scale)));
            }
            None => rows.push(("Normalization", "n/a (empty geometry)".to_string())),
        }

        for (label, value) in rows {
            writer.queue(SetForegroundColor(Color::Grey))?;
            writer.queue(Print(format!("{:<14}", format!("{}:", label))))?;
            writer.queue(SetForegroundColor(Color::Cyan))?;
            writer.queue(Print(value))?;
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        writer.flush()
    }
}

fn format_triple(values: &[f32]) -> String {
    format!("({:.4}, {:.4}, {:.4})", values[0], values[1], values[2])
}
