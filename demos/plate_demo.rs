//! Demonstration of plate growth over a Delaunay mesh

use plate_mesh::*;

fn main() -> Result<()> {
    println!("Generating plates...");

    let config = PlateConfigBuilder::new()
        .seed(42)
        .map_size(MapSize::Small)
        .plate_count(6)?
        .build()?;

    // Drive growth one round at a time
    let mut grower = PlateGrower::from_config(&config)?;
    println!(
        "Triangulated {} points into {} triangles",
        grower.point_map().len(),
        grower.point_map().triangulation().triangle_count()
    );

    while grower.step() == GrowthState::Growing {
        println!(
            "  round {}: {} points unclaimed",
            grower.rounds(),
            grower.unclaimed_count()
        );
    }

    let plate_map = grower.finish();

    println!("\nPlates:");
    for plate in plate_map.plates() {
        println!(
            "  #{} {:?}: {} points, {} triangles, area {:.3}",
            plate.index,
            plate.plate_type,
            plate.point_count(),
            plate.triangle_count(),
            plate.area
        );
    }
    println!("Unclaimed points: {:?}", plate_map.unclaimed());

    let picked = plate_map.pick_plate_by_area(0.5)?;
    let triangle = picked.pick_triangle_by_area(0.5, plate_map.triangulation())?;
    println!("\nArea pick at 0.5: plate {} triangle {}", picked.index, triangle);

    // Test spatial index if available
    #[cfg(feature = "spatial-index")]
    {
        let pos = DVec2::new(0.0, 0.0);
        match plate_map.plate_at(pos) {
            Some(plate) => println!("Position {:?} is on plate {}", pos, plate),
            None => println!("Position {:?} is unclaimed", pos),
        }
    }

    let mesh = generate_plate_mesh(&plate_map, &BasicPlateColorMapper);
    println!("\nPlate mesh: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());

    Ok(())
}
