use timer_core::display::{Color, DISPLAY_MODE_COUNT, DisplayMode, Palette};
use timer_core::settings::persist::{decode, encode};
use timer_core::settings::{
    MemoryStore, SETTINGS_BLOB_LEN, SettingsStore, StorageKey, load_settings, save_settings,
};
use timer_core::{TimerContext, TimerSettings, TimerState};

#[test]
fn empty_store_loads_defaults() {
    let mut store = MemoryStore::new();
    let settings = load_settings(&mut store).unwrap();
    assert_eq!(settings, TimerSettings::default());
}

#[test]
fn saved_settings_load_back() {
    let mut store = MemoryStore::new();
    let mut settings = TimerSettings {
        default_display_mode: DisplayMode::Radial as u8,
        hide_time_text: true,
        default_preset_index: 4,
        default_custom_minutes: 45,
        ..TimerSettings::default()
    };
    settings.set_mode_enabled(DisplayMode::Matrix, false);
    settings.visualization_colors[DisplayMode::Ring.index()] =
        Palette::new(Color::WHITE, Color::RED, Color::BLACK, Color::BLACK);

    save_settings(&mut store, &mut settings).unwrap();
    assert!(store.contains(StorageKey::VERSION));
    assert!(store.contains(StorageKey::DATA));

    let loaded = load_settings(&mut store).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn save_repairs_before_writing() {
    let mut store = MemoryStore::new();
    let mut settings = TimerSettings {
        visualization_enabled: [false; DISPLAY_MODE_COUNT],
        default_custom_minutes: 0,
        ..TimerSettings::default()
    };

    save_settings(&mut store, &mut settings).unwrap();
    assert!(settings.visualization_enabled.iter().all(|enabled| *enabled));

    let mut blob = [0u8; SETTINGS_BLOB_LEN];
    store.read(StorageKey::DATA, &mut blob).unwrap();
    assert_eq!(decode(&blob), Some(settings));
}

#[test]
fn short_blob_falls_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.write(StorageKey::VERSION, &2i32.to_le_bytes()).unwrap();
    store.write(StorageKey::DATA, &[3, 1, 2]).unwrap();

    assert_eq!(load_settings(&mut store).unwrap(), TimerSettings::default());
}

#[test]
fn missing_blob_falls_back_to_defaults() {
    let mut store = MemoryStore::new();
    store.write(StorageKey::VERSION, &2i32.to_le_bytes()).unwrap();

    assert_eq!(load_settings(&mut store).unwrap(), TimerSettings::default());
}

#[test]
fn legacy_keys_overlay_defaults() {
    let mut store = MemoryStore::new();
    store.write(StorageKey::VERSION, &1i32.to_le_bytes()).unwrap();
    store
        .write(StorageKey::DISPLAY_MODE, &5i32.to_le_bytes())
        .unwrap();
    store.write(StorageKey::HIDE_TIME, &[1]).unwrap();

    let settings = load_settings(&mut store).unwrap();
    assert_eq!(settings.display_mode(), DisplayMode::Hourglass);
    assert!(settings.hide_time_text);
    assert_eq!(settings.default_preset_index, 0);
    assert_eq!(
        settings.visualization_colors,
        TimerSettings::default().visualization_colors
    );
}

#[test]
fn legacy_out_of_range_values_are_repaired() {
    let mut store = MemoryStore::new();
    store.write(StorageKey::VERSION, &1i32.to_le_bytes()).unwrap();
    store
        .write(StorageKey::DISPLAY_MODE, &(-4i32).to_le_bytes())
        .unwrap();
    store
        .write(StorageKey::DEFAULT_TIME, &42i32.to_le_bytes())
        .unwrap();

    let settings = load_settings(&mut store).unwrap();
    assert_eq!(settings.display_mode(), DisplayMode::Text);
    assert_eq!(settings.default_preset_index, 0);
}

#[test]
fn unknown_version_is_ignored() {
    let mut store = MemoryStore::new();
    let mut custom = TimerSettings {
        hide_time_text: true,
        ..TimerSettings::default()
    };
    save_settings(&mut store, &mut custom).unwrap();
    store.write(StorageKey::VERSION, &7i32.to_le_bytes()).unwrap();

    assert_eq!(load_settings(&mut store).unwrap(), TimerSettings::default());
}

#[test]
fn stored_blob_is_validated_on_load() {
    let mut store = MemoryStore::new();
    let mut blob = encode(&TimerSettings::default());
    blob[0] = 99;
    blob[5] = 0;
    blob[6] = 0;
    store.write(StorageKey::VERSION, &2i32.to_le_bytes()).unwrap();
    store.write(StorageKey::DATA, &blob).unwrap();

    let settings = load_settings(&mut store).unwrap();
    assert_eq!(settings.display_mode(), DisplayMode::Text);
    assert!(settings.visualization_enabled.iter().all(|enabled| *enabled));
}

#[test]
fn settings_survive_a_session() {
    let mut store = MemoryStore::new();
    let mut settings = load_settings(&mut store).unwrap();
    let mut ctx = TimerContext::new();
    settings.apply_to_context(&mut ctx);

    let _ = ctx.cycle_display_mode();
    let _ = ctx.start(1);
    let _ = ctx.toggle_hide_time_text();
    assert_eq!(ctx.state, TimerState::Running);
    settings.update_from_context(&ctx);
    save_settings(&mut store, &mut settings).unwrap();

    let mut next = TimerContext::new();
    load_settings(&mut store).unwrap().apply_to_context(&mut next);
    assert_eq!(next.display_mode, DisplayMode::Blocks);
    assert!(next.hide_time_text);
    assert_eq!(next.state, TimerState::SelectPreset);
}
