use lignee_core::{Generation, PersonData};
use lignee_layout::{LayoutOptions, layout};

fn tree(generations: &[&[(&str, &[&str])]]) -> Vec<Generation> {
    generations
        .iter()
        .map(|people| {
            people
                .iter()
                .map(|(name, children)| {
                    (name.to_string(), PersonData::new(children.iter().copied()))
                })
                .collect()
        })
        .collect()
}

#[test]
fn lineages_are_listed_biggest_first() {
    let g = layout(
        &tree(&[
            &[("A", &["X"])],
            &[("X", &["P"]), ("O", &["Q", "R"])],
            &[("P", &[]), ("Q", &[]), ("R", &[])],
        ]),
        &LayoutOptions::default(),
    );

    let lineages = g.lineages();
    assert_eq!(lineages.len(), 2);
    assert_eq!(lineages[0].tree_id, 0);
    assert_eq!(lineages[0].len(), 5);
    assert_eq!(lineages[1].len(), 4);

    let names = |band: &[lignee_layout::PersonId]| -> Vec<String> {
        band.iter().map(|&id| g[id].name.clone()).collect()
    };
    assert!(lineages[0].generations[0].is_empty());
    assert_eq!(names(&lineages[0].generations[2]), vec!["Q", "R"]);
    assert_eq!(names(&lineages[1].generations[0]), vec!["A"]);
}

#[test]
fn summary_lists_people_band_by_band_with_node_ids() {
    let g = layout(
        &tree(&[&[("A", &["X", "Y"])], &[("X", &[]), ("Y", &[])]]),
        &LayoutOptions::default(),
    );
    let summary = g.summary();
    assert_eq!(summary.len(), g.len());

    let a = &summary[0];
    assert_eq!(a.id, "A_0");
    assert_eq!(a.order, 0);
    assert_eq!(a.position, vec![0]);
    assert_eq!(a.children, vec!["X_1", "Y_1"]);
    assert!(a.parents.is_empty());

    let ids: Vec<&str> = summary.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["A_0", "Y_1", "X_1", "inv_Y_2", "inv_X_2"]);
    assert_eq!(summary.iter().filter(|p| p.invisible).count(), 2);
}

#[test]
fn summary_serializes_without_empty_titles() {
    let mut t = tree(&[&[("A", &[]), ("B", &[])]]);
    t[0]["A"] = PersonData::default().with_title("Chef");

    let g = layout(&t, &LayoutOptions::default());
    let json = serde_json::to_value(g.summary()).unwrap();
    let people = json.as_array().unwrap();

    assert_eq!(people[0]["title"], "Chef");
    assert!(people[1].get("title").is_none());
    assert!(people[0]["color"].is_string());
    assert_eq!(people[0]["invisible"], false);
}
