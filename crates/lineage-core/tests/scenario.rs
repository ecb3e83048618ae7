//! End-to-end walk through one session: root, spouse, child, save, load.

use lineage_core::{
    DetailsInput, FamilyTree, Gender, PersonInput, Relation, build, hierarchy, load_from_path,
    save_to_path,
};

fn input(given_name: &str, surname: &str, gender: Gender) -> PersonInput {
    PersonInput {
        gender,
        details: DetailsInput {
            given_name: given_name.to_owned(),
            surname: surname.to_owned(),
            life_description: String::new(),
            street_number: "12".to_owned(),
            street_name: "High Street".to_owned(),
            suburb: "Carlton".to_owned(),
            postcode: "3053".to_owned(),
        },
    }
}

#[test]
fn grow_save_and_restore_a_family() {
    let mut tree = FamilyTree::new();

    // Start empty: a root person makes a single-leaf hierarchy.
    let root = tree
        .add_root(&input("Jane", "Doe", Gender::Female))
        .expect("add root");
    let node = build(&tree).expect("build");
    assert_eq!(node.label, "Doe Jane");
    assert!(node.children.is_empty());

    // A spouse shows up under one Spouse heading.
    let spouse = tree
        .add_relative(root, Relation::Spouse, &input("John", "Doe", Gender::Male))
        .expect("add spouse");
    assert_eq!(
        tree.person(root).expect("root").spouse,
        Some(spouse),
        "spouse recorded on root"
    );
    assert_eq!(
        tree.person(spouse).expect("spouse").details.given_name,
        "John"
    );
    let node = build(&tree).expect("build");
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].label, hierarchy::SPOUSE_HEADING);
    assert_eq!(node.children[0].children[0].label, "Doe John");

    // A child lands in the couple's one shared list.
    let child = tree
        .add_relative(root, Relation::Child, &input("Amy", "Doe", Gender::Female))
        .expect("add child");
    assert_eq!(tree.children_of(root).expect("root children"), [child]);
    assert_eq!(tree.children_of(spouse).expect("spouse children"), [child]);

    // Save then load reproduces the three-person graph exactly.
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("doe-family.dat");
    save_to_path(&tree, &path).expect("save");
    let restored = load_from_path(&path).expect("load");

    assert_eq!(restored, tree);
    assert_eq!(restored.person_count(), 3);
    assert_eq!(build(&restored).expect("build"), build(&tree).expect("build"));
}
