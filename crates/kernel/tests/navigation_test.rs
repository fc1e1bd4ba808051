//! Integration tests for navigation: resolution, route gating, item
//! visibility, landing routes and the route guard, run together against the
//! same fixture trees.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;
use std::sync::Arc;

use vitrine_kernel::catalog::seller_tree;
use vitrine_kernel::{
    AccessEvaluator, GuardDecision, IconId, MenuNode, MenuTree, NavState, NoMaintenance,
    RouteGuard, StaticMaintenance, check_item_access, first_allowed_route, screen_id_for_route,
    visible_menu,
};
use vitrine_test_utils::{
    BASE, assert, collaborator, collaborator_without_map, master, permissions, test_evaluator,
    test_tree,
};

/// Resolving a nested support screen yields the full key chain.
#[test]
fn nested_route_resolves_full_chain() {
    let tree = MenuTree::new(
        BASE,
        vec![MenuNode::new("atendimento", "Atendimento").child(
            MenuNode::new("mercado_livre", "Mercado Livre")
                .child(MenuNode::new("perguntas_ml", "Perguntas").path("/perguntas")),
        )],
    )
    .unwrap();

    let key_path = tree.find_key_path("/interno/atendimento/mercado_livre/perguntas");
    assert_eq!(
        key_path.dot_path().as_deref(),
        Some("atendimento.mercado_livre.perguntas_ml")
    );
    assert_eq!(key_path.keys(), ["atendimento", "mercado_livre", "perguntas_ml"]);
}

/// Missing entries anywhere in the chain deny the route.
#[test]
fn route_gate_requires_whole_chain() {
    let evaluator = test_evaluator();
    let map = permissions(&[("a", true)]);
    assert!(!evaluator.check_route_access("/interno/a/b", Some(&map)));
}

/// Unknown routes are denied whatever the map grants.
#[test]
fn unknown_route_is_denied() {
    let evaluator = test_evaluator();
    let everything = permissions(&[
        ("inicio", true),
        ("anuncios", true),
        ("a", true),
        ("b", true),
        ("atendimento", true),
        ("mercado_livre", true),
        ("perguntas_ml", true),
    ]);
    assert!(!evaluator.check_route_access("/not/a/real/path", Some(&everything)));
    assert!(!evaluator.check_route_access("/interno/desconhecido", Some(&everything)));
    assert!(!evaluator.check_route_access("/not/a/real/path", None));
}

/// The same nested node is listed in the menu but refused by the route
/// gate when only its top-level key is granted.
#[test]
fn item_visibility_and_route_gate_differ_for_nested_nodes() {
    let evaluator = test_evaluator();
    let map = permissions(&[("atendimento", true)]);

    assert!(check_item_access(
        "perguntas_ml",
        Some("atendimento.mercado_livre"),
        Some(&map)
    ));
    assert!(!evaluator.check_route_access(
        "/interno/atendimento/mercado_livre/perguntas",
        Some(&map)
    ));

    // Granting the nested keys as well lines the two up.
    let full = permissions(&[
        ("atendimento", true),
        ("mercado_livre", true),
        ("perguntas_ml", true),
    ]);
    assert!(evaluator.check_route_access(
        "/interno/atendimento/mercado_livre/perguntas",
        Some(&full)
    ));
}

/// Landing skips denied sections in declaration order.
#[test]
fn landing_route_skips_denied_sections() {
    let tree = test_tree();
    let principal = collaborator(&[("inicio", false), ("anuncios", true)]);

    assert_eq!(
        first_allowed_route(&tree, Some(&principal), BASE),
        tree.relative_path("anuncios").unwrap()
    );
}

/// Masters always land on the default route.
#[test]
fn landing_route_for_master_is_default() {
    let tree = test_tree();
    for entries in [
        &[][..],
        &[("inicio", false), ("anuncios", true)][..],
        &[("atendimento", true)][..],
    ] {
        assert_eq!(first_allowed_route(&tree, Some(&master(entries)), BASE), BASE);
    }
}

#[test]
fn landing_route_without_map_is_default() {
    let tree = test_tree();
    assert_eq!(
        first_allowed_route(&tree, Some(&collaborator_without_map()), BASE),
        BASE
    );
    assert_eq!(first_allowed_route(&tree, None, BASE), BASE);
}

/// Special routes are open to everyone, even without a map.
#[test]
fn special_routes_always_allowed() {
    let evaluator = test_evaluator();
    for route in [
        "/interno/perfil",
        "/interno/assinatura",
        "/interno/planos",
        "/interno/selecionar-conta",
    ] {
        assert!(evaluator.check_route_access(route, None), "{route}");
    }
}

#[test]
fn detail_routes_match_one_segment_only() {
    let tree = test_tree();
    assert::resolves_to(&tree, "/interno/anuncios/MLB123", "anuncios");
    assert::resolves_to(&tree, "/interno/anuncios", "anuncios");
    assert::unresolved(&tree, "/interno/anuncios/MLB123/editar");
    assert::unresolved(&tree, "/interno/a/b/c");
}

#[test]
fn screen_ids_for_maintenance() {
    let tree = test_tree();
    assert_eq!(
        screen_id_for_route(&tree, "/interno/atendimento/mercado_livre/perguntas").as_deref(),
        Some("atendimento.mercado_livre.perguntas_ml")
    );
    assert_eq!(screen_id_for_route(&tree, "/interno/perfil"), None);
}

#[test]
fn guard_combines_maintenance_role_and_permissions() {
    let evaluator = test_evaluator();
    let guard = RouteGuard::new(
        evaluator,
        Arc::new(StaticMaintenance::new(["atendimento"])),
    );

    let ana = collaborator(&[("anuncios", true), ("atendimento", true)]);
    assert_eq!(guard.decide("/interno/anuncios/MLB1", Some(&ana)), GuardDecision::Allow);
    assert_eq!(guard.decide("/interno", Some(&ana)), GuardDecision::Deny);
    assert_eq!(
        guard.decide("/interno/atendimento/mercado_livre/perguntas", Some(&ana)),
        GuardDecision::Maintenance {
            screen_id: "atendimento.mercado_livre.perguntas_ml".to_string()
        }
    );

    assert!(guard.decide("/interno", Some(&master(&[]))).is_allowed());
    assert_eq!(guard.decide("/interno/anuncios", None), GuardDecision::Deny);
}

#[test]
fn guard_without_maintenance_matches_route_gate() {
    let evaluator = test_evaluator();
    let guard = RouteGuard::new(evaluator.clone(), Arc::new(NoMaintenance));
    let ana = collaborator(&[("a", true), ("b", true)]);
    let map = ana.permissions.clone();

    for path in ["/interno", "/interno/a", "/interno/a/b", "/interno/anuncios/1", "/x"] {
        assert_eq!(
            guard.decide(path, Some(&ana)).is_allowed(),
            evaluator.check_route_access(path, map.as_ref()),
            "{path}"
        );
    }
}

#[test]
fn menu_file_loads_in_declaration_order() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/menu.yml");
    let tree = MenuTree::from_file(BASE, &path).unwrap();

    let roots: Vec<&str> = tree.roots().iter().map(|n| n.key.as_str()).collect();
    assert_eq!(roots, ["inicio", "anuncios", "atendimento", "colaboradores"]);
    assert_eq!(tree.roots()[1].icon, Some(IconId::Listings));

    assert::resolves_to(&tree, "/interno/atendimento/shopee/perguntas", "atendimento.shopee.perguntas_shopee");
    assert::resolves_to(&tree, "/interno/colaboradores/17", "colaboradores");
    assert_eq!(tree.relative_path("inicio").as_deref(), Some("/interno"));
}

#[test]
fn menu_file_and_builder_agree() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/menu.yml");
    let from_file = MenuTree::from_file(BASE, &path).unwrap();
    let json = from_file.to_json_string().unwrap();
    let from_json = MenuTree::from_json_str(BASE, &json).unwrap();
    assert_eq!(from_file.roots(), from_json.roots());
}

#[test]
fn menu_json_with_colliding_paths_is_rejected() {
    let json = r#"{
        "vendas": {"label": "Vendas"},
        "relatorio": {"label": "Relatório", "path": "/vendas"}
    }"#;
    let err = MenuTree::from_json_str(BASE, json).unwrap_err();
    assert!(err.to_string().contains("/interno/vendas"), "{err}");
}

#[test]
fn seller_menu_for_support_collaborator() {
    let tree = seller_tree(BASE).unwrap();
    let map = permissions(&[("atendimento", true), ("shopee", false)]);
    let menu = visible_menu(&tree, Some(&map));

    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].node.key, "atendimento");
    let marketplaces: Vec<&str> = menu[0].children.iter().map(|n| n.node.key.as_str()).collect();
    assert_eq!(marketplaces, ["mercado_livre"]);
    let screens: Vec<&str> = menu[0].children[0]
        .children
        .iter()
        .map(|n| n.path.as_str())
        .collect();
    assert_eq!(
        screens,
        [
            "/interno/atendimento/mercado_livre/perguntas",
            "/interno/atendimento/mercado_livre/reclamacoes",
        ]
    );
}

#[test]
fn nav_state_wires_everything() {
    let state = NavState::with_tree(
        test_tree(),
        Vec::new(),
        Arc::new(NoMaintenance),
        BASE.to_string(),
    );
    let ana = collaborator(&[("inicio", false), ("anuncios", true)]);

    assert_eq!(state.landing_route(Some(&ana)), "/interno/anuncios");
    assert!(state.guard().decide("/interno/anuncios/MLB9", Some(&ana)).is_allowed());
    assert!(!state.evaluator().check_route_access("/interno", ana.permissions.as_ref()));

    // The evaluator and guard share the state's tree.
    assert!(Arc::ptr_eq(state.tree(), state.evaluator().tree()));
}

#[test]
fn evaluators_share_one_tree_across_threads() {
    let tree = Arc::new(seller_tree(BASE).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let evaluator = AccessEvaluator::new(Arc::clone(&tree));
            std::thread::spawn(move || {
                let map = if i % 2 == 0 {
                    permissions(&[("anuncios", true)])
                } else {
                    permissions(&[("anuncios", false)])
                };
                evaluator.check_route_access("/interno/anuncios/MLB1", Some(&map))
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, [true, false, true, false]);
}
