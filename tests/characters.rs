use striplet::{
    CharacterConfig, Comic, ComicConfig, Direction, HAlign, PanelConfig, StripletError, VAlign,
};

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "striplet_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_character_svg(dir: &std::path::Path, name: &str, width: u32, height: u32) {
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><g><rect width="{width}" height="{height}" fill="#808080"/></g></svg>"##
    );
    std::fs::write(dir.join(name), svg).unwrap();
}

fn comic_with_panel(root: &std::path::Path) -> (Comic, striplet::PanelId) {
    let mut comic = Comic::new(&ComicConfig::default(), root).unwrap();
    let panel = comic.add_panel(&PanelConfig::default()).unwrap();
    (comic, panel)
}

#[test]
fn bottom_right_character_lands_in_the_corner() {
    let tmp = temp_dir("char_bottom_right");
    std::fs::create_dir_all(&tmp).unwrap();
    write_character_svg(&tmp, "hero.svg", 40, 80);

    let (mut comic, panel) = comic_with_panel(&tmp);
    let cfg = CharacterConfig {
        resource: Some("hero.svg".into()),
        v_align: Some(VAlign::Bottom),
        h_align: Some(HAlign::Right),
        ..CharacterConfig::default()
    };
    let id = comic.add_character(panel, &cfg).unwrap();

    // Sole panel: width 780, height 264.
    let character = comic.character(id).unwrap();
    assert_eq!(character.size(), (40.0, 80.0));
    assert_eq!(character.offset().x, 780.0 - 40.0);
    assert_eq!(character.offset().y, 264.0 - 80.0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn middle_center_character_is_centered() {
    let tmp = temp_dir("char_middle_center");
    std::fs::create_dir_all(&tmp).unwrap();
    write_character_svg(&tmp, "hero.svg", 40, 80);

    let (mut comic, panel) = comic_with_panel(&tmp);
    let cfg = CharacterConfig {
        resource: Some("hero.svg".into()),
        v_align: Some(VAlign::Middle),
        h_align: Some(HAlign::Center),
        ..CharacterConfig::default()
    };
    let id = comic.add_character(panel, &cfg).unwrap();

    let character = comic.character(id).unwrap();
    assert_eq!(character.offset().x, 780.0 / 2.0 - 20.0);
    assert_eq!(character.offset().y, 264.0 / 2.0 - 40.0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn oversized_character_overflows_with_negative_offset() {
    let tmp = temp_dir("char_oversized");
    std::fs::create_dir_all(&tmp).unwrap();
    write_character_svg(&tmp, "giant.svg", 120, 400);

    let mut comic = Comic::new(&ComicConfig::default(), &tmp).unwrap();
    let panel_cfg = PanelConfig {
        width: Some(100.0),
        ..PanelConfig::default()
    };
    let panel = comic.add_panel(&panel_cfg).unwrap();
    let cfg = CharacterConfig {
        resource: Some("giant.svg".into()),
        v_align: Some(VAlign::Bottom),
        h_align: Some(HAlign::Right),
        ..CharacterConfig::default()
    };
    let id = comic.add_character(panel, &cfg).unwrap();

    let character = comic.character(id).unwrap();
    assert_eq!(character.offset().x, -20.0);
    assert_eq!(character.offset().y, 264.0 - 400.0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn unrecognized_alignment_matches_the_explicit_default() {
    let tmp = temp_dir("char_normalize");
    std::fs::create_dir_all(&tmp).unwrap();
    write_character_svg(&tmp, "hero.svg", 40, 80);

    let typo: CharacterConfig =
        serde_json::from_str(r#"{"resource": "hero.svg", "vAlign": "sideways"}"#).unwrap();
    assert_eq!(typo.v_align, None);

    let (mut comic, panel) = comic_with_panel(&tmp);
    let typo_id = comic.add_character(panel, &typo).unwrap();

    let explicit = CharacterConfig {
        resource: Some("hero.svg".into()),
        v_align: Some(VAlign::Bottom),
        ..CharacterConfig::default()
    };
    let explicit_id = comic.add_character(panel, &explicit).unwrap();

    let typo_offset = comic.character(typo_id).unwrap().offset();
    let explicit_offset = comic.character(explicit_id).unwrap().offset();
    assert_eq!(typo_offset, explicit_offset);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn left_facing_character_is_mirrored_in_the_scene() {
    let tmp = temp_dir("char_mirror");
    std::fs::create_dir_all(&tmp).unwrap();
    write_character_svg(&tmp, "hero.svg", 40, 80);

    let (mut comic, panel) = comic_with_panel(&tmp);
    let cfg = CharacterConfig {
        resource: Some("hero.svg".into()),
        v_align: Some(VAlign::Top),
        h_align: Some(HAlign::Left),
        direction: Some(Direction::Left),
        ..CharacterConfig::default()
    };
    let id = comic.add_character(panel, &cfg).unwrap();

    let character = comic.character(id).unwrap();
    assert_eq!(character.offset().x, 0.0);
    assert_eq!(
        comic.scene().attr(character.node(), "transform"),
        Some("translate(40, 0),scale(-1, 1)")
    );
    assert_eq!(
        comic.scene().attr(character.node(), "id"),
        Some("character0_0")
    );

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn failed_load_leaves_the_panel_untouched() {
    let tmp = temp_dir("char_failed_load");
    std::fs::create_dir_all(&tmp).unwrap();
    write_character_svg(&tmp, "hero.svg", 40, 80);

    let (mut comic, panel) = comic_with_panel(&tmp);
    comic
        .add_character(
            panel,
            &CharacterConfig {
                resource: Some("hero.svg".into()),
                ..CharacterConfig::default()
            },
        )
        .unwrap();

    let width_before = comic.panels()[0].width();
    let err = comic
        .add_character(
            panel,
            &CharacterConfig {
                resource: Some("missing.svg".into()),
                ..CharacterConfig::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, StripletError::ResourceLoad(_)));
    assert_eq!(comic.panels()[0].characters().len(), 1);
    assert_eq!(comic.panels()[0].width(), width_before);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn asset_without_a_group_is_rejected() {
    let tmp = temp_dir("char_no_group");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(
        tmp.join("flat.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10"/></svg>"#,
    )
    .unwrap();

    let (mut comic, panel) = comic_with_panel(&tmp);
    let err = comic
        .add_character(
            panel,
            &CharacterConfig {
                resource: Some("flat.svg".into()),
                ..CharacterConfig::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, StripletError::ResourceLoad(_)));
    assert!(comic.panels()[0].characters().is_empty());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn characters_realign_when_a_new_panel_shrinks_theirs() {
    let tmp = temp_dir("char_realign");
    std::fs::create_dir_all(&tmp).unwrap();
    write_character_svg(&tmp, "hero.svg", 40, 80);

    let (mut comic, panel) = comic_with_panel(&tmp);
    let cfg = CharacterConfig {
        resource: Some("hero.svg".into()),
        h_align: Some(HAlign::Right),
        ..CharacterConfig::default()
    };
    let id = comic.add_character(panel, &cfg).unwrap();
    assert_eq!(comic.character(id).unwrap().offset().x, 780.0 - 40.0);

    comic.add_panel(&PanelConfig::default()).unwrap();
    // The first panel's width dropped to 385; the offset followed.
    assert_eq!(comic.character(id).unwrap().offset().x, 385.0 - 40.0);

    std::fs::remove_dir_all(&tmp).ok();
}
