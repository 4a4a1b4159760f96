//! Square instances.
//!
//! Four zero-cost corners of a 10x10 square plus expensive decoys. With a
//! selection size of four the optimum is the perimeter (objective 40); the
//! crossed "bowtie" through the same corners costs 48.

use cycleforge_core::{NodeId, ProblemData};

/// Ids of the corner nodes, in clockwise order.
pub const CORNERS: [NodeId; 4] = [0, 1, 2, 3];

/// Objective of the perimeter tour through [`CORNERS`].
pub const PERIMETER_OBJECTIVE: i64 = 40;

/// Objective of the crossed tour `0 -> 2 -> 1 -> 3`.
pub const BOWTIE_OBJECTIVE: i64 = 48;

/// Eight nodes, selection size four: the corners and four decoys of cost 1000.
pub fn square_with_decoys() -> ProblemData {
    ProblemData::from_coordinates(
        "square",
        &[
            (0.0, 0.0, 0),
            (10.0, 0.0, 0),
            (10.0, 10.0, 0),
            (0.0, 10.0, 0),
            (5.0, 5.0, 1000),
            (20.0, 5.0, 1000),
            (5.0, 20.0, 1000),
            (-10.0, 5.0, 1000),
        ],
    )
    .expect("square fixture is valid")
}

/// One node with visiting cost 7 (selection size one).
pub fn single_node() -> ProblemData {
    ProblemData::from_coordinates("single", &[(3.0, 4.0, 7)]).expect("single fixture is valid")
}

/// Two nodes (selection size one).
pub fn two_nodes() -> ProblemData {
    ProblemData::from_coordinates("pair", &[(0.0, 0.0, 9), (1.0, 1.0, 4)])
        .expect("pair fixture is valid")
}
