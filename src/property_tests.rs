#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::balance::verify_balance;
    use crate::community::partition;
    use crate::graph::{EdgeData, EdgeKey, GraphModel, Sign};
    use crate::homophily::verify_homophily;
    use crate::similarity::{clustering_coefficients, edge_overlap};
    use crate::traversal::build_tree;
    use crate::Error;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Random small graph: `n` nodes with a 3-way `group` attribute and up to
    /// 20 candidate signed edges (self-loops and repeats dropped).
    fn arb_graph() -> impl Strategy<Value = GraphModel> {
        (1usize..9)
            .prop_flat_map(|n| {
                (
                    proptest::collection::vec(0i64..3, n),
                    proptest::collection::vec((0..n, 0..n, any::<bool>()), 0..20),
                )
            })
            .prop_map(|(groups, raw)| {
                let mut g = GraphModel::new();
                for (i, group) in groups.iter().enumerate() {
                    g.add_node(format!("n{i}"), [("group", *group)]).unwrap();
                }
                for (u, v, negative) in raw {
                    let (u, v) = (format!("n{u}"), format!("n{v}"));
                    if u == v || g.has_edge(&u, &v) {
                        continue;
                    }
                    let sign = if negative { Sign::Negative } else { Sign::Positive };
                    g.add_edge(&u, &v, EdgeData::signed(sign)).unwrap();
                }
                g
            })
    }

    proptest! {
        #[test]
        fn partition_reaches_k_connected_classes(g in arb_graph()) {
            let natural = g.component_count();
            let originals: HashSet<EdgeKey> = g.edges().map(|(k, _)| k).collect();

            for k in 1..=g.node_count() {
                match partition(&g, k) {
                    Ok(p) => {
                        prop_assert!(natural <= k);
                        prop_assert_eq!(p.component_count(), k);
                        let labels: HashSet<usize> = p.labels().values().copied().collect();
                        prop_assert_eq!(labels, (0..k).collect::<HashSet<_>>());
                        for r in p.removed_edges() {
                            prop_assert!(originals.contains(&r.key));
                        }
                        // Classes are exactly the components of the reduced graph.
                        let reduced = p.apply(&g);
                        let comps = reduced.connected_components();
                        prop_assert_eq!(comps.len(), k);
                        for comp in comps {
                            let first = p.label(comp[0].as_str());
                            prop_assert!(comp.iter().all(|id| p.label(id.as_str()) == first));
                        }
                    }
                    Err(Error::InvalidRequest(_)) => prop_assert!(natural > k),
                    Err(Error::Unsatisfiable { .. }) => {}
                    Err(other) => prop_assert!(false, "unexpected error {other}"),
                }
            }
        }

        #[test]
        fn partition_never_mutates_caller_graph(g in arb_graph()) {
            let before: Vec<EdgeKey> = g.edges().map(|(k, _)| k).collect();
            let _ = partition(&g, g.node_count());
            let after: Vec<EdgeKey> = g.edges().map(|(k, _)| k).collect();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn analyses_are_repeatable(g in arb_graph()) {
            prop_assert_eq!(verify_balance(&g), verify_balance(&g));
            prop_assert_eq!(
                verify_homophily(&g, "group", 0.5).unwrap(),
                verify_homophily(&g, "group", 0.5).unwrap()
            );
            prop_assert_eq!(edge_overlap(&g), edge_overlap(&g));
            prop_assert_eq!(clustering_coefficients(&g), clustering_coefficients(&g));
        }

        #[test]
        fn balance_verdict_is_justified(g in arb_graph()) {
            let verdict = verify_balance(&g);
            if let Some([f0, _]) = verdict.factions() {
                let side0: HashSet<&str> = f0.iter().map(|n| n.as_str()).collect();
                for (key, data) in g.edges() {
                    let same = side0.contains(key.u().as_str()) == side0.contains(key.v().as_str());
                    prop_assert_eq!(same, !data.effective_sign().is_negative());
                }
            }
            if let Some(w) = verdict.witness() {
                prop_assert_eq!(w.sign_product(), Sign::Negative);
                prop_assert!(w.len() >= 3);
                let n = w.nodes().len();
                prop_assert_eq!(n, w.len());
                let mut product = Sign::Positive;
                for (i, (key, _)) in w.edges().iter().enumerate() {
                    let a = w.nodes()[i].as_str();
                    let b = w.nodes()[(i + 1) % n].as_str();
                    prop_assert_eq!(key, &EdgeKey::new(a, b));
                    product = product.times(g.edge(a, b).unwrap().effective_sign());
                }
                prop_assert_eq!(product, Sign::Negative);
            }
        }

        #[test]
        fn similarity_scores_are_bounded(g in arb_graph()) {
            prop_assert_eq!(edge_overlap(&g).len(), g.edge_count());
            for o in edge_overlap(&g).values() {
                prop_assert!((0.0..=1.0).contains(o));
            }
            let cc = clustering_coefficients(&g);
            prop_assert_eq!(cc.len(), g.node_count());
            for (id, c) in &cc {
                prop_assert!((0.0..=1.0).contains(c));
                if g.degree(id.as_str()).unwrap() < 2 {
                    prop_assert_eq!(*c, 0.0);
                }
            }
        }

        #[test]
        fn homophily_ratio_is_bounded(g in arb_graph(), threshold in 0.0f64..=1.0) {
            let v = verify_homophily(&g, "group", threshold).unwrap();
            prop_assert!((0.0..=1.0).contains(&v.ratio));
            prop_assert_eq!(v.edge_count, g.edge_count());
            prop_assert_eq!(v.is_homophilous, v.ratio >= threshold);
        }

        #[test]
        fn bfs_tree_spans_root_component(g in arb_graph()) {
            let root = g.node_ids().next().unwrap().clone();
            let tree = build_tree(&g, root.as_str()).unwrap();

            let component = g
                .connected_components()
                .into_iter()
                .find(|c| c.contains(&root))
                .unwrap();
            prop_assert_eq!(tree.len(), component.len());

            for (parent, child) in tree.edges() {
                prop_assert!(g.has_edge(parent.as_str(), child.as_str()));
                prop_assert_eq!(
                    tree.depth(child.as_str()).unwrap(),
                    tree.depth(parent.as_str()).unwrap() + 1
                );
            }
            // BFS depth is hop distance: no graph edge skips a level.
            for (key, _) in g.edges() {
                if let (Some(a), Some(b)) = (tree.depth(key.u().as_str()), tree.depth(key.v().as_str())) {
                    prop_assert!(a.abs_diff(b) <= 1);
                }
            }
        }
    }
}
