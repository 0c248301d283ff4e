//! Reading and writing Bedrock `.mcstructure` files.

pub mod bridge;
pub mod compat;
pub mod error;
pub mod format;
pub mod load;
pub mod options;
pub mod save;

pub use error::PersistError;
pub use load::{load, load_from_path, load_from_reader, load_with_report, LoadReport};
pub use options::CodecOptions;
pub use save::{dump, dump_to_path, dump_to_writer, dump_with, to_compound};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use trimstruct_core::{Axis, Block, StructureConfig, Value};
    use trimstruct_nbt::{ByteOrder, Compression};
    use trimstruct_world::Structure;

    fn random_block(rng: &mut StdRng) -> Option<Block> {
        let kinds = ["stone", "dirt", "wool", "oak_sign", "mymod:crystal"];
        // One extra draw past the end stands for void.
        let id = *kinds.get(rng.gen_range(0..=kinds.len()))?;
        let mut block = Block::from_identifier(id).expect("valid identifier");
        if rng.gen_bool(0.5) {
            block = block.with_state("color", ["red", "blue"][rng.gen_range(0..2)]);
        }
        if rng.gen_bool(0.3) {
            block = block.with_state("age", rng.gen_range(0..4));
        }
        if rng.gen_bool(0.2) {
            block = block.with_state("lit", rng.gen_bool(0.5));
        }
        if rng.gen_bool(0.25) {
            block = block.with_extra("Text", format!("note {}", rng.gen_range(0..100)));
        }
        Some(block)
    }

    fn random_pos(rng: &mut StdRng, size: IVec3) -> IVec3 {
        IVec3::new(
            rng.gen_range(0..size.x),
            rng.gen_range(0..size.y),
            rng.gen_range(0..size.z),
        )
    }

    fn random_structure(seed: u64) -> Structure {
        let mut rng = StdRng::seed_from_u64(seed);
        let size = IVec3::new(
            rng.gen_range(1..6),
            rng.gen_range(1..5),
            rng.gen_range(1..6),
        );
        let mut s = Structure::new(size, None).expect("valid size");
        for _ in 0..40 {
            let block = random_block(&mut rng);
            if rng.gen_bool(0.2) {
                let from = random_pos(&mut rng, size);
                let to = random_pos(&mut rng, size);
                s.fill_blocks(from, to, block.as_ref()).expect("in range");
            } else {
                let pos = random_pos(&mut rng, size);
                s.set_block(pos, block.as_ref()).expect("in range");
            }
        }
        s
    }

    fn assert_same_cells(a: &Structure, b: &Structure) {
        assert_eq!(a.size(), b.size());
        for ((pa, ba), (pb, bb)) in a.iter_blocks().zip(b.iter_blocks()) {
            assert_eq!(pa, pb);
            assert_eq!(ba, bb, "block at {pa}");
            assert_eq!(ba.extra_data(), bb.extra_data(), "extra data at {pa}");
        }
    }

    #[test]
    fn test_random_roundtrip() {
        for seed in 0..25 {
            let original = random_structure(seed);
            let bytes = dump(&original).expect("dump");
            let loaded = load(&bytes).expect("load");
            assert_same_cells(&original, &loaded);
        }
    }

    #[test]
    fn test_roundtrip_after_transforms() {
        let mut original = random_structure(99);
        original.rotate(90).expect("valid rotation");
        original.mirror(Axis::Z).expect("horizontal axis");
        let loaded = load(&dump(&original).expect("dump")).expect("load");
        assert_same_cells(&original, &loaded);
    }

    #[test]
    fn test_roundtrip_with_codec_options() {
        let original = random_structure(3);
        for (byte_order, compression) in [
            (ByteOrder::Big, Compression::None),
            (ByteOrder::Little, Compression::Gzip),
        ] {
            let options = CodecOptions {
                byte_order,
                compression,
            };
            let bytes = dump_with(&original, options).expect("dump");
            let report = load_with_report(&bytes, options, StructureConfig::default())
                .expect("load");
            assert!(report.warnings.is_empty());
            assert_same_cells(&original, &report.structure);
        }
    }

    #[test]
    fn test_path_roundtrip() {
        let original = random_structure(11);
        let path = std::env::temp_dir().join(format!(
            "trimstruct-roundtrip-{}.mcstructure",
            std::process::id()
        ));
        dump_to_path(&original, &path).expect("write file");
        let loaded = load_from_path(&path).expect("read file");
        std::fs::remove_file(&path).expect("remove file");
        assert_same_cells(&original, &loaded);
    }

    #[test]
    fn test_reader_writer_roundtrip() {
        let original = random_structure(5);
        let mut buf = Vec::new();
        dump_to_writer(&original, &mut buf, CodecOptions::default()).expect("dump");
        let report = load_from_reader(
            buf.as_slice(),
            CodecOptions::default(),
            StructureConfig::default(),
        )
        .expect("load");
        assert_same_cells(&original, &report.structure);
    }

    #[test]
    fn test_many_extra_data_cells_roundtrip() {
        let count = 100_000;
        let mut s = Structure::new(IVec3::new(count, 1, 1), None).expect("valid size");
        let sign = Block::from_identifier("oak_sign").expect("valid identifier");
        for x in 0..count {
            let block = sign.clone().with_extra("Text", x);
            s.set_block(IVec3::new(x, 0, 0), Some(&block)).expect("in range");
        }

        let started = std::time::Instant::now();
        let loaded = load(&dump(&s).expect("dump")).expect("load");
        assert!(started.elapsed() < std::time::Duration::from_secs(20));

        assert_eq!(loaded.overlay_len(), count as usize);
        let last = loaded
            .get_block(IVec3::new(count - 1, 0, 0))
            .expect("in range");
        assert_eq!(last.extra_data().get("Text"), Some(&Value::from(count - 1)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_from_path("/nonexistent/dir/none.mcstructure");
        assert!(matches!(result, Err(PersistError::Io(_))));
    }
}
