/// Instantiates the behavioural suite every `Graph` backend has to pass.
///
/// Each test compares the backend against a plain map-based model on seeded random edge lists
/// and against the respective other backend, so both representations stay interchangeable.
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident) => {
        #[cfg(test)]
        mod $env {
            use std::{collections::BTreeMap, ops::ControlFlow};

            use crate::prelude::*;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng, seq::SliceRandom};
            use rand_pcg::Pcg64Mcg;

            type Model = BTreeMap<(Node, Node), Weight>;

            /// Creates a list of at most `m_ub` random edges over nodes `0..n` with small integral weights
            fn random_edges<R: Rng>(rng: &mut R, n: Node, m_ub: usize) -> Vec<Edge> {
                (0..m_ub)
                    .map(|_| {
                        let from = rng.random_range(0..n);
                        let to = rng.random_range(0..n);
                        Edge(from, to, Weight::from(rng.random_range(0u8..8)))
                    })
                    .collect_vec()
            }

            /// Last write per `(from, to)` wins, mirroring `add_edge`
            fn model_of(edges: &[Edge]) -> Model {
                edges
                    .iter()
                    .map(|&Edge(from, to, weight)| ((from, to), weight))
                    .collect()
            }

            fn random_instances() -> impl Iterator<Item = (Node, Vec<Edge>)> {
                let mut rng = Pcg64Mcg::seed_from_u64(3);
                [5 as Node, 12, 30]
                    .into_iter()
                    .flat_map(|n| [n as usize, 2 * n as usize, 5 * n as usize].map(move |m| (n, m)))
                    .map(move |(n, m)| (n, random_edges(&mut rng, n, m)))
                    .collect_vec()
                    .into_iter()
            }

            #[test]
            fn graph_new() {
                let graph = <$graph>::new();

                assert!(graph.is_empty());
                assert_eq!(graph.node_count(), 0);
                assert_eq!(graph.end_node(), 0);
                assert_eq!(graph.edge_count(), 0);
                assert!(graph.edges().is_empty());
                assert_eq!(graph.for_each_node(&mut |node| ControlFlow::Break(node)), ControlFlow::Continue(()));
                assert!(graph.weight(0, 0).is_nan());

                let graph = <$graph>::with_capacity(16);
                assert!(graph.is_empty());
            }

            #[test]
            fn weights_match_model() {
                for (n, edges) in random_instances() {
                    let model = model_of(&edges);
                    let graph = <$graph>::from_edges(edges.iter());

                    assert_eq!(graph.edge_count(), model.len());
                    assert_eq!(
                        graph.ordered_edges(),
                        model.iter().map(|(&(from, to), &weight)| Edge(from, to, weight)).collect_vec()
                    );

                    for from in -2..n + 2 {
                        for to in -2..n + 2 {
                            let weight = graph.weight(from, to);
                            assert_eq!(graph.has_edge(from, to), !weight.is_nan());
                            assert_eq!(model.get(&(from, to)).copied(), (!weight.is_nan()).then_some(weight));
                            assert_eq!(graph.has_edge_with_weight(from, to, weight), !weight.is_nan());
                            assert!(!graph.has_edge_with_weight(from, to, NO_WEIGHT));
                        }
                    }
                }
            }

            #[test]
            fn nodes_match_model() {
                for (_, edges) in random_instances() {
                    let graph = <$graph>::from_edges(edges.iter());
                    let nodes = edges
                        .iter()
                        .flat_map(|e| [e.from(), e.to()])
                        .sorted()
                        .dedup()
                        .collect_vec();

                    assert_eq!(graph.ordered_nodes(), nodes);
                    assert_eq!(graph.node_count() as usize, nodes.len());
                    assert_eq!(graph.end_node(), nodes.last().map_or(0, |&u| u + 1));
                    assert!(nodes.iter().all(|&u| graph.has_node(u)));
                    assert_eq!(graph.node_check().iter_checked().collect_vec(), nodes);
                }
            }

            #[test]
            fn digresses_match_model() {
                for (n, edges) in random_instances() {
                    let model = model_of(&edges);
                    let graph = <$graph>::from_edges(edges.iter());

                    for from in 0..n {
                        for to in 0..n {
                            let forward = model.get(&(from, to)).copied();
                            let backward = model.get(&(to, from)).copied();

                            assert_eq!(graph.has_digress(from, to), forward.is_some() || backward.is_some());

                            let light = graph.light_digress(from, to);
                            match (forward, backward) {
                                (Some(a), Some(b)) => assert_eq!(light, a.min(b)),
                                (Some(a), None) | (None, Some(a)) => assert_eq!(light, a),
                                (None, None) => assert!(light.is_nan()),
                            }
                        }

                        let mut ingresses = Vec::new();
                        let _ = graph.for_each_ingress(from, &mut |u, weight| {
                            ingresses.push((u, weight));
                            ControlFlow::Continue(())
                        });
                        ingresses.sort_by_key(|&(u, _)| u);
                        let expected = model
                            .iter()
                            .filter(|&(&(_, to), _)| to == from)
                            .map(|(&(u, _), &weight)| (u, weight))
                            .collect_vec();
                        assert_eq!(ingresses, expected);

                        let mut digresses = Vec::new();
                        let _ = graph.for_each_light_digress(from, &mut |u, weight| {
                            digresses.push((u, weight));
                            ControlFlow::Continue(())
                        });
                        digresses.sort_by_key(|&(u, _)| u);
                        let expected = (0..n)
                            .filter(|&u| graph.has_digress(from, u))
                            .map(|u| (u, graph.light_digress(from, u)))
                            .collect_vec();
                        assert_eq!(digresses, expected);
                    }
                }
            }

            #[test]
            fn equality_is_order_invariant() {
                let rng = &mut Pcg64Mcg::seed_from_u64(4);

                for (_, mut edges) in random_instances() {
                    // duplicates would make the final weight depend on insertion order
                    edges.sort_by(Edge::total_cmp);
                    edges.dedup_by_key(|e| e.endpoints());

                    let graph = <$graph>::from_edges(edges.iter());
                    edges.shuffle(rng);
                    let shuffled = <$graph>::from_edges(edges.iter());
                    let sparse = SparseGraph::from_edges(edges.iter());
                    let dense = DenseGraph::from_edges(edges.iter());

                    assert_eq!(graph, graph.clone());
                    assert_eq!(graph, shuffled);
                    assert_eq!(shuffled, graph);
                    assert_eq!(graph, sparse);
                    assert_eq!(graph, dense);
                }
            }

            #[test]
            fn subsets() {
                for (_, edges) in random_instances() {
                    let full = <$graph>::from_edges(edges.iter());
                    let half = <$graph>::from_edges(edges.iter().step_by(2));
                    let empty = <$graph>::new();

                    // `step_by` may drop the last write to a pair; rebuild half from `full`'s weights
                    let mut half_consistent = <$graph>::new();
                    for e in half.edges() {
                        half_consistent.add_edge(e.from(), e.to(), full.weight(e.from(), e.to()));
                    }

                    assert!(full.is_subset(&full));
                    assert!(empty.is_subset(&half_consistent));
                    assert!(half_consistent.is_subset(&full));
                    assert!(empty.is_subset(&full));
                    assert!(full.is_superset(&half_consistent));

                    assert_eq!(
                        full == half_consistent,
                        full.is_subset(&half_consistent) && half_consistent.is_subset(&full)
                    );
                }
            }

            #[test]
            fn subset_stops_at_first_mismatch() {
                let mut graph = <$graph>::from_edges([(0, 1, 1.0), (1, 2, 1.0)]);
                let other = <$graph>::from_edges([(0, 1, 1.0)]);
                assert!(other.is_subset(&graph));
                assert!(!graph.is_subset(&other));

                graph.add_edge(0, 1, 2.0);
                assert!(!other.is_subset(&graph));
            }

            #[test]
            fn isolated_nodes_do_not_affect_equality() {
                let mut graph = <$graph>::from_edges([(0, 1, 1.0)]);
                let reference = graph.clone();
                graph.add_node(7);

                assert!(graph.has_node(7));
                assert_ne!(graph.node_count(), reference.node_count());
                assert_eq!(graph, reference);
                assert_eq!(<$graph>::new(), {
                    let mut only_nodes = <$graph>::new();
                    only_nodes.add_node(3);
                    only_nodes
                });
            }

            #[test]
            fn double_edges() {
                let mut graph = <$graph>::new();
                graph.add_double_edge(2, 5, 0.5);
                graph.add_edge(5, 2, 4.0);

                assert_eq!(graph.weight(2, 5), 0.5);
                assert_eq!(graph.weight(5, 2), 4.0);
                assert_eq!(graph.light_digress(5, 2), 0.5);
                assert_eq!(graph.edge_count(), 2);
            }

            #[test]
            fn self_loops_are_edges() {
                let graph = <$graph>::from_edges([(1, 1, 3.0), (0, 0, 0.0), (0, 1, 1.0)]);

                assert!(graph.has_edge(1, 1));
                assert!(graph.has_edge(0, 0));
                assert_eq!(graph.edge_count(), 3);

                let mut loops = Vec::new();
                let _ = graph.for_each_egress(1, &mut |to, weight| {
                    loops.push((to, weight));
                    ControlFlow::Continue(())
                });
                assert_eq!(loops, vec![(1, 3.0)]);
            }

            #[test]
            fn for_each_edge_propagates_break() {
                let graph = <$graph>::from_edges([(0, 1, 1.0), (1, 2, 9.0), (2, 0, 1.0)]);

                let mut seen = 0;
                let flow = graph.for_each_edge(&mut |_, to, weight| {
                    seen += 1;
                    if weight > 5.0 { ControlFlow::Break(to) } else { ControlFlow::Continue(()) }
                });
                assert_eq!(flow, ControlFlow::Break(2));
                assert!(seen <= 3);

                let flow = graph.for_each_node(&mut |node| {
                    if node == 1 { ControlFlow::Break(node) } else { ControlFlow::Continue(()) }
                });
                assert_eq!(flow, ControlFlow::Break(1));
            }
        }
    };
}

pub(crate) use test_graph_ops;
