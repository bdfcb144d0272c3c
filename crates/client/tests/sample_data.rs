use std::path::Path;

use iconic_content::{BundledLoader, DatasetStore};
use iconic_core::FilterMode;

#[test]
fn shipped_sample_dataset_installs() {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let bundled = BundledLoader::new(data_dir).load().expect("sample data should load");
    assert_eq!((bundled.sprite.width(), bundled.sprite.height()), (160, 32));

    let mut store = DatasetStore::new();
    let snapshot = store
        .load_bundled(&bundled.text, bundled.sprite)
        .expect("sample data should decode");

    assert_eq!(snapshot.icons().len(), 5);
    assert_eq!(snapshot.sprite().filter_mode(), FilterMode::Point);

    let wires = store.lookup_by_name("Wires").unwrap();
    assert_eq!(wires.parts()[2].name(), "Cut wire #2");
    let keypad = store.lookup_by_name("Keypad").unwrap();
    assert_eq!(keypad.parts()[1].name(), "Bottom-right key^");
    assert_eq!(store.lookup_by_name("Blank").unwrap().parts()[0].indices().len(), 1024);
}
