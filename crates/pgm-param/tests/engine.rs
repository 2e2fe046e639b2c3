use std::cell::RefCell;
use std::sync::Arc;

use pgm_circuit::LeafDistribution;
use pgm_model::{DomainKind, ScalarValue, SymbolSet, VariableDomain};
use pgm_param::{ParameterizeError, Parameterizer};
use pgm_record::{MappingError, Record, RecordDescriptor, TemplateField};

struct StaticRecord {
    descriptor: RecordDescriptor,
}

impl StaticRecord {
    fn new(descriptor: RecordDescriptor) -> Arc<Self> {
        Arc::new(Self { descriptor })
    }
}

impl Record for StaticRecord {
    fn describe(&self) -> Result<RecordDescriptor, MappingError> {
        Ok(self.descriptor.clone())
    }
}

fn free_position() -> Arc<StaticRecord> {
    StaticRecord::new(RecordDescriptor::new(
        "PositionDAO",
        vec![
            TemplateField::free("x", VariableDomain::Continuous),
            TemplateField::free("y", VariableDomain::Continuous),
            TemplateField::free("z", VariableDomain::Continuous),
        ],
    ))
}

fn orientation() -> Arc<StaticRecord> {
    StaticRecord::new(RecordDescriptor::new(
        "OrientationDAO",
        vec![
            TemplateField::free("x", VariableDomain::Continuous),
            TemplateField::fixed("y", VariableDomain::Continuous, 3.14),
            TemplateField::free("z", VariableDomain::Continuous),
            TemplateField::excluded("w"),
        ],
    ))
}

fn pose() -> Arc<StaticRecord> {
    StaticRecord::new(RecordDescriptor::new(
        "PoseDAO",
        vec![
            TemplateField::nested("position", free_position()),
            TemplateField::nested("orientation", orientation()),
        ],
    ))
}

#[test]
fn free_scalars_produce_variables_without_assignments() {
    let result = Parameterizer::new()
        .generate_parameterizations(free_position().as_ref())
        .expect("parameterization");

    let paths: Vec<&str> = result.paths().collect();
    assert_eq!(
        paths,
        vec!["PositionDAO.x", "PositionDAO.y", "PositionDAO.z"]
    );
    assert!(result.simple_event().is_empty());
    assert!(
        result
            .variables()
            .all(|variable| variable.kind() == DomainKind::Continuous)
    );
}

#[test]
fn fixed_field_is_assigned_and_excluded_field_vanishes() {
    let result = Parameterizer::new()
        .generate_parameterizations(orientation().as_ref())
        .expect("parameterization");

    let paths: Vec<&str> = result.paths().collect();
    assert_eq!(
        paths,
        vec!["OrientationDAO.x", "OrientationDAO.y", "OrientationDAO.z"]
    );
    assert_eq!(result.simple_event().len(), 1);
    assert_eq!(
        result.simple_event().singleton("OrientationDAO.y"),
        Some(&ScalarValue::Continuous(3.14))
    );
    assert!(!result.contains_path("OrientationDAO.w"));
}

#[test]
fn nested_records_concatenate_paths() {
    let result = Parameterizer::new()
        .generate_parameterizations(pose().as_ref())
        .expect("parameterization");

    let paths: Vec<&str> = result.paths().collect();
    assert_eq!(
        paths,
        vec![
            "PoseDAO.position.x",
            "PoseDAO.position.y",
            "PoseDAO.position.z",
            "PoseDAO.orientation.x",
            "PoseDAO.orientation.y",
            "PoseDAO.orientation.z",
        ]
    );
    assert_eq!(
        result.simple_event().singleton("PoseDAO.orientation.y"),
        Some(&ScalarValue::Continuous(3.14))
    );
    assert!(paths.iter().all(|path| !path.ends_with(".w")));
}

#[test]
fn collection_elements_are_indexed() {
    let first = free_position();
    let waypoints: Vec<Arc<dyn Record>> = vec![first.clone(), first];
    let route = StaticRecord::new(RecordDescriptor::new(
        "RouteDAO",
        vec![TemplateField::many("waypoints", waypoints)],
    ));

    let result = Parameterizer::new()
        .generate_parameterizations(route.as_ref())
        .expect("parameterization");

    let paths: Vec<&str> = result.paths().collect();
    assert_eq!(
        paths,
        vec![
            "RouteDAO.waypoints.0.x",
            "RouteDAO.waypoints.0.y",
            "RouteDAO.waypoints.0.z",
            "RouteDAO.waypoints.1.x",
            "RouteDAO.waypoints.1.y",
            "RouteDAO.waypoints.1.z",
        ]
    );
}

#[test]
fn empty_collection_yields_nothing() {
    let route = StaticRecord::new(RecordDescriptor::new(
        "RouteDAO",
        vec![TemplateField::many("waypoints", Vec::new())],
    ));

    let result = Parameterizer::new()
        .generate_parameterizations(route.as_ref())
        .expect("parameterization");
    assert!(result.is_empty());
    assert!(result.simple_event().is_empty());
}

#[test]
fn symbolic_and_integer_fields_carry_their_domains() {
    let states: SymbolSet = ["idle", "moving"].into_iter().collect();
    let robot = StaticRecord::new(RecordDescriptor::new(
        "RobotDAO",
        vec![
            TemplateField::fixed("status", VariableDomain::Symbolic(states), "idle"),
            TemplateField::free("joint_count", VariableDomain::Integer),
        ],
    ));

    let result = Parameterizer::new()
        .generate_parameterizations(robot.as_ref())
        .expect("parameterization");

    assert_eq!(
        result.variable("RobotDAO.status").map(|v| v.kind()),
        Some(DomainKind::Symbolic)
    );
    assert_eq!(
        result.variable("RobotDAO.joint_count").map(|v| v.kind()),
        Some(DomainKind::Integer)
    );
    assert_eq!(
        result.simple_event().singleton("RobotDAO.status"),
        Some(&ScalarValue::Symbol("idle".to_string()))
    );
}

#[test]
fn fixed_value_of_wrong_kind_is_rejected() {
    let bad = StaticRecord::new(RecordDescriptor::new(
        "PositionDAO",
        vec![TemplateField::fixed("x", VariableDomain::Continuous, "north")],
    ));

    let err = Parameterizer::new()
        .generate_parameterizations(bad.as_ref())
        .unwrap_err();
    assert!(matches!(
        err,
        ParameterizeError::TypeMismatch {
            ref path,
            expected: DomainKind::Continuous,
            ..
        } if path == "PositionDAO.x"
    ));
}

#[test]
fn fixed_symbol_outside_declared_set_is_rejected() {
    let states: SymbolSet = ["idle", "moving"].into_iter().collect();
    let bad = StaticRecord::new(RecordDescriptor::new(
        "RobotDAO",
        vec![TemplateField::fixed(
            "status",
            VariableDomain::Symbolic(states),
            "flying",
        )],
    ));

    let err = Parameterizer::new()
        .generate_parameterizations(bad.as_ref())
        .unwrap_err();
    assert!(matches!(
        err,
        ParameterizeError::TypeMismatch {
            ref path,
            expected: DomainKind::Symbolic,
            ..
        } if path == "RobotDAO.status"
    ));
}

struct Node {
    next: RefCell<Option<Arc<Node>>>,
}

impl Node {
    fn leaf() -> Arc<Self> {
        Arc::new(Self {
            next: RefCell::new(None),
        })
    }
}

impl Record for Node {
    fn describe(&self) -> Result<RecordDescriptor, MappingError> {
        let mut fields = vec![TemplateField::free("value", VariableDomain::Continuous)];
        if let Some(next) = self.next.borrow().as_ref() {
            fields.push(TemplateField::nested("next", next.clone()));
        }
        Ok(RecordDescriptor::new("NodeDAO", fields))
    }
}

#[test]
fn acyclic_chain_traverses_fully() {
    let tail = Node::leaf();
    let head = Node::leaf();
    *head.next.borrow_mut() = Some(tail);

    let result = Parameterizer::new()
        .generate_parameterizations(head.as_ref())
        .expect("parameterization");
    let paths: Vec<&str> = result.paths().collect();
    assert_eq!(paths, vec!["NodeDAO.value", "NodeDAO.next.value"]);
}

#[test]
fn direct_cycle_is_detected() {
    let node = Node::leaf();
    *node.next.borrow_mut() = Some(node.clone());

    let err = Parameterizer::new()
        .generate_parameterizations(node.as_ref())
        .unwrap_err();
    assert!(matches!(
        err,
        ParameterizeError::CycleDetected { ref path } if path == "NodeDAO.next"
    ));
}

#[test]
fn transitive_cycle_is_detected() {
    let first = Node::leaf();
    let second = Node::leaf();
    *first.next.borrow_mut() = Some(second.clone());
    *second.next.borrow_mut() = Some(first.clone());

    let err = Parameterizer::new()
        .generate_parameterizations(first.as_ref())
        .unwrap_err();
    assert!(matches!(
        err,
        ParameterizeError::CycleDetected { ref path } if path == "NodeDAO.next.next"
    ));
}

#[test]
fn shared_instance_off_the_active_path_is_not_a_cycle() {
    let shared = free_position();
    let frame = StaticRecord::new(RecordDescriptor::new(
        "FrameDAO",
        vec![
            TemplateField::nested("origin", shared.clone()),
            TemplateField::nested("target", shared),
        ],
    ));

    let result = Parameterizer::new()
        .generate_parameterizations(frame.as_ref())
        .expect("parameterization");
    assert_eq!(result.len(), 6);
    assert!(result.contains_path("FrameDAO.origin.x"));
    assert!(result.contains_path("FrameDAO.target.x"));
}

struct Broken;

impl Record for Broken {
    fn describe(&self) -> Result<RecordDescriptor, MappingError> {
        Err(MappingError::Describe {
            record: "BrokenDAO".to_string(),
            reason: "no record mapping registered".to_string(),
        })
    }
}

#[test]
fn describe_failure_propagates_as_mapping_error() {
    let err = Parameterizer::new()
        .generate_parameterizations(&Broken)
        .unwrap_err();
    assert!(matches!(
        err,
        ParameterizeError::Mapping(MappingError::Describe { ref record, .. })
            if record == "BrokenDAO"
    ));
}

#[test]
fn duplicate_field_names_are_a_mapping_error() {
    let bad = StaticRecord::new(RecordDescriptor::new(
        "PositionDAO",
        vec![
            TemplateField::free("x", VariableDomain::Continuous),
            TemplateField::free("x", VariableDomain::Continuous),
        ],
    ));

    let err = Parameterizer::new()
        .generate_parameterizations(bad.as_ref())
        .unwrap_err();
    assert!(matches!(
        err,
        ParameterizeError::Mapping(MappingError::DuplicateField { ref field, .. })
            if field == "x"
    ));
}

#[test]
fn projected_variables_preserve_traversal_order() {
    let result = Parameterizer::new()
        .generate_parameterizations(pose().as_ref())
        .expect("parameterization");

    let projected = result.random_events_variables();
    assert_eq!(projected.len(), result.len());
    for (projection, variable) in projected.iter().zip(result.variables()) {
        assert_eq!(projection, variable);
    }
}

#[test]
fn traversal_is_deterministic() {
    let engine = Parameterizer::new();
    let first = engine
        .generate_parameterizations(pose().as_ref())
        .expect("parameterization");
    let second = engine
        .generate_parameterizations(pose().as_ref())
        .expect("parameterization");
    assert_eq!(first, second);
}

#[test]
fn distribution_from_empty_parameterization_is_rejected() {
    let route = StaticRecord::new(RecordDescriptor::new(
        "RouteDAO",
        vec![TemplateField::many("waypoints", Vec::new())],
    ));
    let result = Parameterizer::new()
        .generate_parameterizations(route.as_ref())
        .expect("parameterization");

    let err = result.create_fully_factorized_distribution().unwrap_err();
    assert!(matches!(err, ParameterizeError::EmptyParameterization));
}

#[test]
fn distribution_places_dirac_leaves_on_fixed_fields() {
    let result = Parameterizer::new()
        .generate_parameterizations(orientation().as_ref())
        .expect("parameterization");
    let circuit = result
        .create_fully_factorized_distribution()
        .expect("circuit");

    assert_eq!(circuit.len(), 3);
    let by_name: Vec<(&str, &LeafDistribution)> = circuit
        .factors()
        .iter()
        .map(|factor| (factor.variable().name(), factor.distribution()))
        .collect();
    assert_eq!(
        by_name[1],
        (
            "OrientationDAO.y",
            &LeafDistribution::Dirac {
                value: ScalarValue::Continuous(3.14)
            }
        )
    );
    assert_eq!(
        by_name[0],
        (
            "OrientationDAO.x",
            &LeafDistribution::Gaussian {
                mean: 0.0,
                variance: 1.0
            }
        )
    );
}
