//! Engine properties: staging, transactions and operational views.

use routemu::router::{
    AdminState, LinkState, Router, RouterError, RouterInterface, RouterMode, StaticRoute,
};

fn configuring(name: &str) -> Router {
    let mut router = Router::new(name);
    router.set_mode(RouterMode::Configuration).unwrap();
    router
}

fn via(dst: &str, gw: &str) -> StaticRoute {
    StaticRoute::via(dst.parse().unwrap(), gw.parse().unwrap())
}

#[test]
fn staged_edits_are_invisible_until_commit() {
    let mut router = configuring("R1");
    router
        .configure_interface_address("eth0", "10.0.0.1/24".parse().unwrap())
        .unwrap();
    router.add_route(via("0.0.0.0/0", "10.0.0.254")).unwrap();

    assert!(router.has_uncommitted_changes());
    assert!(router.routing_table().is_empty());
    assert_eq!(router.interfaces()[0].get_address(), None);
    assert_eq!(router.staged_routing_table().len(), 1);

    router.commit_changes().unwrap();
    assert!(!router.has_uncommitted_changes());
    assert_eq!(router.routing_table().len(), 1);
    assert_eq!(
        router.interfaces()[0].get_address(),
        Some("10.0.0.1/24".parse().unwrap())
    );
}

#[test]
fn commit_without_changes_fails() {
    let mut router = configuring("R1");
    assert_eq!(router.commit_changes(), Err(RouterError::NoChangesToCommit));
}

#[test]
fn exit_is_refused_while_dirty() {
    let mut router = configuring("R1");
    router.disable_interface("eth0").unwrap();
    assert_eq!(
        router.set_mode(RouterMode::Operational),
        Err(RouterError::UncommittedChanges)
    );
    assert_eq!(router.mode(), RouterMode::Configuration);

    router.set_mode_forced(RouterMode::Operational);
    assert_eq!(router.mode(), RouterMode::Operational);
    assert!(!router.has_uncommitted_changes());
    assert!(!router.interfaces()[0].is_disabled());
}

#[test]
fn discard_restores_committed_state() {
    let mut router = configuring("R1");
    router.add_route(via("10.0.0.0/8", "192.168.1.1")).unwrap();
    router.commit_changes().unwrap();
    router.remove_route(&via("10.0.0.0/8", "192.168.1.1")).unwrap();
    assert!(router.staged_routing_table().is_empty());

    router.discard_changes().unwrap();
    assert_eq!(router.mode(), RouterMode::Configuration);
    assert!(!router.has_uncommitted_changes());
    assert_eq!(router.staged_routing_table().len(), 1);
}

#[test]
fn duplicate_and_missing_routes() {
    let mut router = configuring("R1");
    let route = via("10.0.0.0/8", "192.168.1.1");
    router.add_route(route.clone()).unwrap();
    assert!(router.add_route(route.clone()).unwrap_err().is_duplicate());

    router.disable_route(&route).unwrap();
    assert!(router.disable_route(&route).unwrap_err().is_duplicate());

    router.remove_route(&route).unwrap();
    assert!(router.remove_route(&route).unwrap_err().is_not_found());
}

#[test]
fn disabled_routes_are_not_shown() {
    let mut router = configuring("R1");
    router
        .configure_interface_address("eth0", "10.0.0.1/24".parse().unwrap())
        .unwrap();
    let route = via("0.0.0.0/0", "10.0.0.254");
    router.add_route(route.clone()).unwrap();
    router.disable_route(&route).unwrap();
    router.commit_changes().unwrap();
    router.set_mode(RouterMode::Operational).unwrap();

    let table = router.show_ip_route().unwrap();
    assert!(!table.contains("S>*"));
    assert!(table.contains("C>* 10.0.0.0/24 is directly connected, eth0"));
}

#[test]
fn views_require_operational_mode() {
    let router = configuring("R1");
    assert!(router.show_ip_route().unwrap_err().is_invalid_mode());
    assert!(router.show_interfaces().unwrap_err().is_invalid_mode());
}

#[test]
fn disabling_an_interface_keeps_link_state() {
    let mut router = Router::with_interfaces(
        "R1",
        [RouterInterface::new("eth0"), RouterInterface::new("eth1")],
    )
    .unwrap();
    router.set_mode(RouterMode::Configuration).unwrap();
    router.disable_interface("eth1").unwrap();
    router.commit_changes().unwrap();

    let eth1 = &router.interfaces()[1];
    assert_eq!(eth1.status().admin, AdminState::AdminDown);
    assert_eq!(eth1.status().link, LinkState::Down);
}

#[test]
fn reset_restores_factory_state() {
    let mut router = configuring("R1");
    router.add_route(via("0.0.0.0/0", "10.0.0.254")).unwrap();
    router.commit_changes().unwrap();

    router.reset();
    assert_eq!(router.name(), "R1");
    assert_eq!(router.mode(), RouterMode::Operational);
    assert!(router.routing_table().is_empty());
    assert!(!router.has_uncommitted_changes());
}

#[test]
fn duplicates_ignore_the_disabled_flag() {
    let mut router = configuring("R1");
    let route = via("10.0.0.0/8", "192.168.1.1");
    router.add_route(route.clone()).unwrap();
    router.disable_route(&route).unwrap();
    assert!(router.add_route(route).unwrap_err().is_duplicate());
}

#[test]
fn commit_discard_commit_is_a_no_op() {
    let mut router = configuring("R1");
    router.add_route(via("10.0.0.0/8", "192.168.1.1")).unwrap();
    router.commit_changes().unwrap();
    let committed = router.routing_table().clone();

    router.discard_changes().unwrap();
    assert_eq!(router.commit_changes(), Err(RouterError::NoChangesToCommit));
    assert_eq!(router.routing_table(), &committed);
}

#[test]
fn operational_mutations_change_nothing() {
    let mut router = Router::new("R1");
    let before = (
        router.interfaces().to_vec(),
        router.staged_interfaces().to_vec(),
    );
    let errors = [
        router.add_route(via("0.0.0.0/0", "10.0.0.254")),
        router.configure_interface_address("eth0", "10.0.0.1/24".parse().unwrap()),
        router.disable_interface("eth0"),
        router.commit_changes(),
        router.discard_changes(),
    ];
    assert!(errors.iter().all(|e| e.as_ref().unwrap_err().is_invalid_mode()));
    assert_eq!(router.interfaces(), before.0.as_slice());
    assert_eq!(router.staged_interfaces(), before.1.as_slice());
    assert!(router.staged_routing_table().is_empty());
}

#[test]
fn reserved_addresses_are_rejected() {
    let mut router = configuring("R1");
    for address in ["192.168.1.0/24", "192.168.1.255/24"] {
        let err = router
            .configure_interface_address("eth0", address.parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidAddress { .. }), "{address}");
    }
    for address in ["192.168.1.1/24", "10.0.0.0/31", "10.0.0.1/31", "10.0.0.7/32"] {
        router
            .configure_interface_address("eth0", address.parse().unwrap())
            .unwrap();
    }
}
