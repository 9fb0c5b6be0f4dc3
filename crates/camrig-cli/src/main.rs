use std::{error::Error, fs, path::Path};

use camrig_core::{PointPacket, Port, TriangulatedPacket};
use camrig_pipeline::{AnchorPolicy, ArrayTriangulator, FrameResolver, SessionConfig};
use clap::Parser;

/// Batch triangulation for a calibrated camera rig.
#[derive(Debug, Parser)]
#[command(author, version, about = "Triangulate matched 2-D points from a calibrated camera rig")]
struct Args {
    /// Path to the calibration session TOML.
    #[arg(long)]
    config: String,

    /// Path to a JSON file containing an array of matched point packets.
    #[arg(long)]
    packets: String,

    /// Anchor camera port. Lowest-mean-RMSE selection is used if omitted.
    #[arg(long)]
    anchor: Option<Port>,
}

fn load_packets(path: &Path) -> Result<Vec<PointPacket>, Box<dyn Error>> {
    let data = fs::read_to_string(path)?;
    let packets = serde_json::from_str(&data)?;
    Ok(packets)
}

fn run_triangulation(
    config_path: &str,
    packets_path: &str,
    anchor: Option<Port>,
) -> Result<String, Box<dyn Error>> {
    let config = SessionConfig::from_path(Path::new(config_path))?;
    let packets = load_packets(Path::new(packets_path))?;

    let policy = match anchor {
        Some(port) => AnchorPolicy::Fixed(port),
        None => AnchorPolicy::LowestMeanRmse,
    };
    let array = FrameResolver::new(policy).resolve(&config)?;
    let triangulator = ArrayTriangulator::new(&array);

    let results: Result<Vec<TriangulatedPacket>, _> = triangulator
        .triangulate_batch(&packets)
        .into_iter()
        .collect();

    Ok(serde_json::to_string_pretty(&results?)?)
}

fn main() {
    env_logger::init();
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let json = run_triangulation(&args.config, &args.packets, args.anchor)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camrig_core::{synthetic, Mat3};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_mat3(m: &Mat3) -> String {
        format!(
            "[[{}, {}, {}], [{}, {}, {}], [{}, {}, {}]]",
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)]
        )
    }

    fn synthetic_session() -> String {
        let rotation = synthetic::yaw_rotation(-0.08);
        let mut doc = String::new();
        for port in 0..2u32 {
            doc.push_str(&format!(
                r#"
                [cam_{port}]
                port = {port}
                size = [1280, 720]
                rotation_count = 0
                error = 0.3
                matrix = [[800.0, 0.0, 640.0], [0.0, 780.0, 360.0], [0.0, 0.0, 1.0]]
                distortions = [0.0, 0.0, 0.0, 0.0, 0.0]
                exposure = -7
                grid_count = 20
                ignore = false
                verified_resolutions = [[1280, 720]]
                "#
            ));
        }
        doc.push_str(&format!(
            r#"
            [stereo_0_1]
            rotation = {}
            translation = [0.5, 0.0, 0.0]
            RMSE = 0.5
            "#,
            toml_mat3(&rotation)
        ));
        doc
    }

    #[test]
    fn helper_smoke_test() {
        let config_text = synthetic_session();
        let config = SessionConfig::from_toml_str(&config_text).unwrap();
        let array = FrameResolver::new(AnchorPolicy::Fixed(0))
            .resolve(&config)
            .unwrap();

        let points = synthetic::target_points(3, 2, 0.2, 2.0);
        let packet = synthetic::matched_packet(
            array.camera(0).unwrap(),
            array.camera(1).unwrap(),
            &points,
            0,
        )
        .unwrap();

        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(config_text.as_bytes()).unwrap();
        let packets_file = NamedTempFile::new().unwrap();
        serde_json::to_writer(&packets_file, &vec![packet]).unwrap();

        let json = run_triangulation(
            config_file.path().to_str().unwrap(),
            packets_file.path().to_str().unwrap(),
            Some(0),
        )
        .expect("cli helper should succeed");

        let results: Vec<TriangulatedPacket> = serde_json::from_str(&json).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].len(), points.len());
        for (expected, got) in points.iter().zip(results[0].points.iter()) {
            let got = got.expect("non-degenerate geometry");
            assert!((got - expected).norm() < 1e-3);
        }
    }

    #[test]
    fn unknown_pair_fails_the_run() {
        let config_text = synthetic_session();

        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(config_text.as_bytes()).unwrap();

        let bad_packet = PointPacket::new((0, 7), 0, Vec::new(), Vec::new()).unwrap();
        let packets_file = NamedTempFile::new().unwrap();
        serde_json::to_writer(&packets_file, &vec![bad_packet]).unwrap();

        let result = run_triangulation(
            config_file.path().to_str().unwrap(),
            packets_file.path().to_str().unwrap(),
            Some(0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn lowest_mean_rmse_policy_is_the_default() {
        let config_text = synthetic_session();
        let mut config_file = NamedTempFile::new().unwrap();
        config_file.write_all(config_text.as_bytes()).unwrap();

        let packets_file = NamedTempFile::new().unwrap();
        serde_json::to_writer(&packets_file, &Vec::<PointPacket>::new()).unwrap();

        let json = run_triangulation(
            config_file.path().to_str().unwrap(),
            packets_file.path().to_str().unwrap(),
            None,
        )
        .unwrap();
        let results: Vec<TriangulatedPacket> = serde_json::from_str(&json).unwrap();
        assert!(results.is_empty());
    }
}
