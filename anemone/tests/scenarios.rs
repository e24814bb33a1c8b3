mod common;

use std::rc::Rc;

use anemone::{
    build_container, AnemoneError, Click, ClickAction, ContainerDefinition, ContainerHost,
    ContainerKind, Drag, DragMode, IndexResolver, View,
};

use common::{open_view, rendered, Grid, Host, VIEWER};

const CHEST: [&str; 3] = ["XXXXXXXXX", "XXXXXXXXX", "XXXXXXXXX"];

fn click(raw_slot: i32) -> Click<u64> {
    Click {
        viewer: VIEWER,
        raw_slot,
        action: ClickAction::Left,
    }
}

#[test]
fn small_grid_shape_and_counts() {
    let grid = Grid::new(&["AAB", "AAB", "CCC"]);
    assert_eq!(grid.kind(), Ok(ContainerKind::Grid3x3));
    assert_eq!(grid.capacity(), 9);
    assert_eq!(grid.count_of('A'), 4);
    assert_eq!(grid.count_of('B'), 2);
    assert_eq!(grid.count_of('C'), 3);
    assert_eq!(grid.symbol_at(2), Some('B'));
    assert_eq!(grid.template().occurrences_before(2, 'A'), 2);
}

#[test]
fn chest_page_turn_changes_page_but_not_symbol() {
    let mut host = Host::new();
    let mut view = open_view(Grid::new(&CHEST), &mut host);
    assert_eq!(host.container(view.container()).unwrap().kind, ContainerKind::Chest { rows: 3 });

    let first = rendered(&view, &host);
    assert!(first.iter().all(|slot| slot.map(|i| i.page()) == Some(0)));

    view.next_page(&mut host).unwrap();
    let second = rendered(&view, &host);
    assert_eq!(second.len(), 27);
    for (slot, index) in second.iter().enumerate() {
        let index = index.expect("every slot is filled");
        assert_eq!(index.page(), 1);
        assert_eq!(index.symbol(), 'X');
        assert_eq!(index.slot(), slot);
    }
    assert_eq!(second[0].unwrap().occurrence(), 27);
    assert_eq!(view.resolve(0).unwrap().occurrence(), 27);
}

#[test]
fn refresh_keeps_container_identity_and_discards_scratch() {
    let mut host = Host::new();
    let mut view = open_view(Grid::new(&CHEST), &mut host);
    view.open(&mut host).unwrap();
    let shown = *view.container();

    for _ in 0..3 {
        view.next_page(&mut host).unwrap();
    }
    view.previous_page(&mut host).unwrap();
    view.set_page(&mut host, 5).unwrap();
    view.reset_page(&mut host).unwrap();
    view.refresh(&mut host).unwrap();

    assert_eq!(*view.container(), shown);
    assert_eq!(host.top_container(&VIEWER), Some(shown));
    assert_eq!(host.live_containers(), 1);
    assert_eq!(view.page(), 0);
}

#[test]
fn open_is_idempotent() {
    let mut host = Host::new();
    let mut view = open_view(Grid::new(&CHEST), &mut host);

    view.open(&mut host).unwrap();
    assert!(view.is_open(&host));
    let allocations = host.allocations();

    view.open(&mut host).unwrap();
    assert_eq!(host.allocations(), allocations);
    assert_eq!(host.container(view.container()).unwrap().title.as_deref(), Some("Grid"));
}

#[test]
fn building_twice_renders_identical_content() {
    let mut host = Host::new();
    let mut view = open_view(Grid::new(&["AB#", "#BA", "CCC"]), &mut host);
    view.set_page(&mut host, 3).unwrap();

    let definition = Rc::clone(view.definition());
    let first = build_container(&*definition, &view, &mut host).unwrap();
    let second = build_container(&*definition, &view, &mut host).unwrap();

    assert_ne!(first, second);
    assert_eq!(host.contents(&first), host.contents(&second));
    assert_eq!(host.contents(&first), host.contents(view.container()));
}

#[test]
fn forward_and_reverse_indices_agree() {
    let templates: [&[&str]; 3] = [
        &["AAB", "AAB", "CCC"],
        &["#########", "#IIIIIII#", "<###X###>"],
        &["ABCABCABC", "CBACBACBA", "AAAAAAAAA", "BBBBBBBBB", "C", ""],
    ];
    for rows in templates {
        let mut host = Host::new();
        let mut view = open_view(Grid::new(rows), &mut host);
        for page in [-2, 0, 1, 4] {
            view.set_page(&mut host, page).unwrap();
            for (slot, forward) in rendered(&view, &host).into_iter().enumerate() {
                let reverse = view.resolve(slot as i32);
                assert_eq!(forward, reverse, "template {:?} page {} slot {}", rows, page, slot);
            }
        }
    }
}

#[test]
fn empty_template_yields_zero_slots_and_no_indices() {
    let mut host = Host::new();
    let grid = Grid::new(&[]);
    let recorder = Rc::clone(&grid.recorder);
    let mut view = open_view(grid, &mut host);

    assert_eq!(view.size(), 0);
    assert!(rendered(&view, &host).is_empty());
    assert_eq!(view.resolve(0), None);

    view.handle_click(&mut host, &click(0)).unwrap();
    view.next_page(&mut host).unwrap();
    assert!(recorder.clicks.borrow().is_empty());
}

#[test]
fn drag_keeps_resolved_slots_in_order() {
    let mut host = Host::new();
    let grid = Grid::new(&CHEST);
    let recorder = Rc::clone(&grid.recorder);
    let mut view = open_view(grid, &mut host);

    let drag = Drag {
        viewer: VIEWER,
        raw_slots: vec![0, 1, 100],
        mode: DragMode::Even,
    };
    view.handle_drag(&mut host, &drag).unwrap();

    let drags = recorder.drags.borrow();
    assert_eq!(drags.len(), 1);
    let slots: Vec<usize> = drags[0].iter().map(|index| index.slot()).collect();
    assert_eq!(slots, vec![0, 1]);
}

#[test]
fn drag_with_no_resolved_slots_still_reports_once() {
    let mut host = Host::new();
    let grid = Grid::new(&CHEST);
    let recorder = Rc::clone(&grid.recorder);
    let mut view = open_view(grid, &mut host);

    let drag = Drag {
        viewer: VIEWER,
        raw_slots: vec![27, 45, -999],
        mode: DragMode::Single,
    };
    view.handle_drag(&mut host, &drag).unwrap();
    assert_eq!(*recorder.drags.borrow(), vec![Vec::new()]);
}

#[test]
fn clicks_outside_the_menu_are_ignored() {
    let mut host = Host::new();
    let grid = Grid::new(&["AAB", "AAB", "CCC"]);
    let recorder = Rc::clone(&grid.recorder);
    let mut view = open_view(grid, &mut host);

    for raw_slot in [9, 36, -999, -1] {
        view.handle_click(&mut host, &click(raw_slot)).unwrap();
    }
    assert!(recorder.clicks.borrow().is_empty());

    view.handle_click(&mut host, &click(5)).unwrap();
    let clicks = recorder.clicks.borrow();
    assert_eq!(clicks.len(), 1);
    assert_eq!(clicks[0].symbol(), 'B');
    assert_eq!(clicks[0].occurrence(), 1);
}

#[test]
fn pages_are_unbounded_by_default() {
    let mut host = Host::new();
    let mut view = open_view(Grid::new(&["<#######>"]), &mut host);

    view.previous_page(&mut host).unwrap();
    assert_eq!(view.page(), -1);
    let first = rendered(&view, &host)[0].unwrap();
    assert_eq!(first.page(), -1);
    assert_eq!(first.occurrence(), -1);
    assert_eq!(first.total(), -9);
}

#[test]
fn page_count_clamps_navigation() {
    let mut host = Host::new();
    let mut view = open_view(Grid::new(&["<#######>"]).with_pages(3), &mut host);

    view.previous_page(&mut host).unwrap();
    assert_eq!(view.page(), 0);
    view.set_page(&mut host, 10).unwrap();
    assert_eq!(view.page(), 2);
    view.next_page(&mut host).unwrap();
    assert_eq!(view.page(), 2);
}

#[test]
fn click_handlers_can_turn_pages() {
    let mut host = Host::new();
    let mut view = open_view(Grid::new(&["<#######>"]), &mut host);

    view.handle_click(&mut host, &click(8)).unwrap();
    view.handle_click(&mut host, &click(8)).unwrap();
    assert_eq!(view.page(), 2);
    assert_eq!(rendered(&view, &host)[8].unwrap().page(), 2);

    view.handle_click(&mut host, &click(0)).unwrap();
    assert_eq!(view.page(), 1);
}

#[test]
fn unsupported_shapes_fail_at_construction() {
    let mut host = Host::new();
    let result = View::new(
        Rc::new(Grid::new(&["AAAAA", "AAAAA"])),
        VIEWER,
        &mut host,
    );
    assert_eq!(
        result.unwrap_err(),
        AnemoneError::UnsupportedShape { width: 5, height: 2 }
    );
    assert_eq!(host.allocations(), 0);
}

#[test]
fn ragged_rows_leave_trailing_slots_empty() {
    let mut host = Host::new();
    let view = open_view(Grid::new(&["ABCDEFGHI", "AB"]), &mut host);
    let contents = rendered(&view, &host);

    assert_eq!(contents.len(), 18);
    assert_eq!(contents[10].unwrap().symbol(), 'B');
    assert!(contents[11..].iter().all(Option::is_none));
    assert_eq!(view.resolve(11), None);
}

#[test]
fn locate_points_at_the_rendered_slot() {
    let mut host = Host::new();
    let mut view = open_view(Grid::new(&["#########", "#IIIIIII#", "<###X###>"]), &mut host);
    let template = view.definition().template();
    let resolver = IndexResolver::new(&template);

    let (page, slot) = resolver.locate('I', 17).unwrap();
    assert_eq!((page, slot), (2, 13));

    view.set_page(&mut host, page).unwrap();
    let shown = rendered(&view, &host)[slot].unwrap();
    assert_eq!(shown.symbol(), 'I');
    assert_eq!(shown.occurrence(), 17);
}
