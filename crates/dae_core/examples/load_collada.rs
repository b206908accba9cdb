//! Example: Load and inspect a COLLADA file.
//!
//! Run with: cargo run --example load_collada -- assets/cube.dae

use std::env;

use dae_core::collada::{load_collada, ColladaDocument};
use dae_core::NodeId;
use dae_math::Vec3;

fn print_node(document: &ColladaDocument, id: NodeId, indent: usize) {
    let node = &document.nodes[id];
    let origin = document.nodes.world_transform(id).transform_point3(Vec3::ZERO);
    println!(
        "{:indent$}- {} [{}] at ({:.2}, {:.2}, {:.2}), {} transforms",
        "",
        node.name,
        node.id.as_deref().unwrap_or("-"),
        origin.x,
        origin.y,
        origin.z,
        node.transforms.len(),
        indent = indent * 2
    );
    for geometry in &node.geometry_instances {
        println!("{:indent$}  geometry #{}", "", geometry, indent = indent * 2);
    }
    for &child in &node.children {
        print_node(document, child, indent + 1);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_collada <path-to-dae-file>");
        return;
    }

    let path = &args[1];
    println!("Loading COLLADA file: {}", path);

    match load_collada(path) {
        Ok(document) => {
            println!("\n=== Asset ===");
            println!("Unit size: {} m", document.asset.unit_size);
            println!("Up axis: {:?}", document.asset.up_axis);

            println!("\n--- Geometries ---");
            for (id, geometry) in &document.geometries {
                println!("  {} ({} sources)", id, geometry.sources.len());
                for source in &geometry.sources {
                    match document.read_source(source) {
                        Ok(tuples) => println!("    #{}: {} tuples", source, tuples.len()),
                        Err(e) => println!("    #{}: {}", source, e),
                    }
                }
            }

            println!("\n--- Scene ---");
            match document.root {
                Some(root) => print_node(&document, root, 1),
                None => println!("  (no visual scene)"),
            }
        }
        Err(e) => {
            eprintln!("Error loading COLLADA file: {}", e);
        }
    }
}
