use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;

use tectogen::codec;
use tectogen::config::{Params, Partition};
use tectogen::crease::RidgeCrease;
use tectogen::render;

#[derive(Deserialize)]
struct GenerateRequest {
    seed: Option<u64>,
    // Irregular partition (default)
    width: Option<usize>,
    height: Option<usize>,
    num_plates: Option<usize>,
    // Regular partition: setting plate_size switches modes
    plate_size: Option<usize>,
    plates_x: Option<usize>,
    plates_y: Option<usize>,
    wrap_x: Option<bool>,
    wrap_y: Option<bool>,
    water: Option<bool>,
    magma: Option<bool>,
    sea_level: Option<f32>,
    crust_thickness: Option<f32>,
    ridge_amplitude: Option<f32>,
    ridge_width: Option<f32>,
}

#[derive(Serialize)]
struct GenerateResponse {
    layers: Vec<Layer>,
    terrain_text: String,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> String {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)
        .expect("PNG encode failed");
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    format!("data:image/png;base64,{}", b64)
}

async fn generate_handler(
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    let seed = req.seed.unwrap_or(42);

    let defaults = Params::default();
    let partition = if let Some(plate_size) = req.plate_size {
        Partition::Regular {
            plate_size,
            plates_x: req.plates_x.unwrap_or(4),
            plates_y: req.plates_y.unwrap_or(4),
        }
    } else {
        Partition::Irregular {
            num_plates: req.num_plates.unwrap_or(24),
            width: req.width.unwrap_or(1024),
            height: req.height.unwrap_or(512),
        }
    };
    let params = Params {
        partition,
        wrap_x: req.wrap_x.unwrap_or(defaults.wrap_x),
        wrap_y: req.wrap_y.unwrap_or(defaults.wrap_y),
        water: req.water.unwrap_or(defaults.water),
        magma: req.magma.unwrap_or(defaults.magma),
        sea_level: req.sea_level.unwrap_or(defaults.sea_level),
        crust_thickness: req.crust_thickness.unwrap_or(defaults.crust_thickness),
    };
    let crease_defaults = RidgeCrease::default();
    let crease = RidgeCrease {
        amplitude: req.ridge_amplitude.unwrap_or(crease_defaults.amplitude),
        width: req.ridge_width.unwrap_or(crease_defaults.width),
    };

    let response = tokio::task::spawn_blocking(move || {
        let (map, timings) = tectogen::generate(seed, &params, &crease)
            .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

        let layers = vec![
            Layer {
                name: "plates".into(),
                data_url: encode_png(&map.plate_rgba, map.w, map.h),
            },
            Layer {
                name: "heightmap".into(),
                data_url: encode_png(&render::render_heightmap(&map.terrain.land), map.w, map.h),
            },
            Layer {
                name: "map".into(),
                data_url: encode_png(&map.rgba, map.w, map.h),
            },
        ];

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        Ok(GenerateResponse {
            layers,
            terrain_text: codec::serialize(&map.terrain),
            timings: timing_entries,
            width: map.w,
            height: map.h,
        })
    })
    .await
    .unwrap()?;

    Ok(Json(response))
}

#[tokio::main]
async fn main() {
    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/generate", post(generate_handler))
        .fallback_service(frontend);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    eprintln!("tectogen server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
