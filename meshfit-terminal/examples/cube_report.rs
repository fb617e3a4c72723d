/// Example: Print the info panel for built-in shapes without a model file
///
/// Usage: cargo run --example cube_report

use std::io::{self, stdout};
use meshfit_core::{Mesh, Model, ModelFormat, Normalizer, RadiusMode, TargetRange};
use meshfit_terminal::ModelReport;

fn main() -> io::Result<()> {
    // A large cube next to a small tetrahedron, as two child meshes
    let model = Model::named("shapes")
        .with_child(Model::named("cube").with_mesh(Mesh::cube(40.0)))
        .with_child(Model::named("tetrahedron").with_mesh(Mesh::tetrahedron(2.0)));

    for mode in [RadiusMode::HalfMaxDimension, RadiusMode::BoundingSphere] {
        println!("Radius mode: {:?}", mode);
        let normalizer = Normalizer::new(TargetRange::default(), mode);
        ModelReport::new(ModelFormat::Obj, &model, &normalizer).draw(&mut stdout())?;
        println!();
    }

    Ok(())
}
