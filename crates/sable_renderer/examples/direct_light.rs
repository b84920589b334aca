//! Direct lighting estimate.
//!
//! Builds a small scene from JSON and estimates the light arriving at a point
//! on the floor, once with cosine sampling alone and once mixing in light
//! sampling. Both converge to the same value; the mixture gets there with far
//! less noise.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sable_core::SceneDescription;
use sable_renderer::{
    build_world, Color, CosinePdf, HitRecord, Hittable, Interval, MixturePdf, Pdf, Ray,
    SceneResult, Vec3, World,
};

const SCENE: &str = r#"{
    "materials": {
        "floor": { "type": "lambertian", "albedo": {
            "type": "checker",
            "even": { "type": "solid", "color": [0.2, 0.3, 0.1] },
            "odd": { "type": "solid", "color": [0.9, 0.9, 0.9] }
        } },
        "lamp": { "type": "diffuse_light", "emit": [4.0, 4.0, 4.0] }
    },
    "objects": [
        { "object": { "type": "sphere", "center": [0.0, -1000.0, 0.0], "radius": 1000.0, "material": "floor" } },
        { "light": true, "object": {
            "type": "translate", "offset": [1.0, 4.0, 0.0],
            "object": { "type": "sphere", "center": [0.0, 0.0, 0.0], "radius": 1.0, "material": "lamp" }
        } }
    ]
}"#;

const SAMPLES: usize = 4096;

fn main() -> SceneResult<()> {
    env_logger::init();

    let description = SceneDescription::from_json(SCENE)?;
    let world = build_world(&description)?;

    let probe = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y, 0.0);
    let Some(rec) = world.objects().hit(&probe, Interval::new(0.001, f32::INFINITY)) else {
        println!("Probe ray missed the floor");
        return Ok(());
    };
    println!("Shading point {:?}", rec.p);

    let mut rng = StdRng::seed_from_u64(2024);
    let cosine = CosinePdf::new(rec.normal);

    let cosine_only = estimate(&world, &probe, &rec, &cosine, &mut rng);
    println!("Cosine sampling:       {:?}", cosine_only);

    let lights = world.light_pdf(rec.p)?;
    let mixture = MixturePdf::new(&cosine, &lights);
    let mixed = estimate(&world, &probe, &rec, &mixture, &mut rng);
    println!("Cosine + light mixture: {:?}", mixed);

    Ok(())
}

/// Mean emitted light reaching `rec` along one bounce drawn from `pdf`.
fn estimate(
    world: &World,
    ray_in: &Ray,
    rec: &HitRecord<'_>,
    pdf: &dyn Pdf,
    rng: &mut StdRng,
) -> Color {
    let mut sum = Color::ZERO;

    for _ in 0..SAMPLES {
        let Some((attenuation, scattered)) = rec.material.scatter_with_pdf(ray_in, rec, pdf, rng)
        else {
            continue;
        };

        if let Some(light_rec) = world
            .objects()
            .hit(&scattered, Interval::new(0.001, f32::INFINITY))
        {
            sum += attenuation * light_rec.material.emitted(&scattered, &light_rec);
        }
    }

    sum / SAMPLES as f32
}
