use std::path::PathBuf;
use std::process::ExitCode;

use tectogen::codec;
use tectogen::config::Params;
use tectogen::crease::RidgeCrease;
use tectogen::render;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let out_dir: PathBuf = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    std::fs::create_dir_all(&out_dir).expect("failed to create output directory");

    let params = Params::default();
    let crease = RidgeCrease::default();

    eprintln!("Generating terrain with seed={seed}");

    let (map, timings) = match tectogen::generate(seed, &params, &crease) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    let save = |name: &str, rgba: &[u8]| {
        let path = out_dir.join(name);
        image::save_buffer(
            &path,
            rgba,
            map.w as u32,
            map.h as u32,
            image::ColorType::Rgba8,
        )
        .expect("failed to save image");
        eprintln!("Saved {}", path.display());
    };

    save("plates.png", &map.plate_rgba);
    save("heightmap.png", &render::render_heightmap(&map.terrain.land));
    save("map.png", &map.rgba);

    let text_path = out_dir.join("terrain.txt");
    std::fs::write(&text_path, codec::serialize(&map.terrain)).expect("failed to save terrain");
    eprintln!("Saved {}", text_path.display());

    eprintln!("\nDone.");
    ExitCode::SUCCESS
}
