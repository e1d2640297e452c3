//! Embedded 3 x 3 grid used by the demo.
//!
//! Nine intersections `nRC` (row, column) joined by two-way streets.  Each
//! direction of a street is its own edge, named `nRC_nRC` from tail to head.
//! East-west blocks are 200 m long, north-south blocks 150 m.  Every
//! intersection allows straight, left, right, and U-turn moves.

use std::io::Cursor;

use tr_network::{NetworkResult, RoadNetwork, load_network_reader};

pub const EDGES_CSV: &str = "\
edge_id,length\n\
n00_n01,200\n\
n00_n10,150\n\
n01_n02,200\n\
n01_n11,150\n\
n01_n00,200\n\
n02_n12,150\n\
n02_n01,200\n\
n10_n11,200\n\
n10_n20,150\n\
n10_n00,150\n\
n11_n12,200\n\
n11_n21,150\n\
n11_n10,200\n\
n11_n01,150\n\
n12_n22,150\n\
n12_n11,200\n\
n12_n02,150\n\
n20_n21,200\n\
n20_n10,150\n\
n21_n22,200\n\
n21_n20,200\n\
n21_n11,150\n\
n22_n21,200\n\
n22_n12,150\n\
";

pub const CONNECTIONS_CSV: &str = "\
from,direction,to\n\
n00_n01,s,n01_n02\n\
n00_n01,r,n01_n11\n\
n00_n01,t,n01_n00\n\
n00_n10,l,n10_n11\n\
n00_n10,s,n10_n20\n\
n00_n10,t,n10_n00\n\
n01_n02,r,n02_n12\n\
n01_n02,t,n02_n01\n\
n01_n11,l,n11_n12\n\
n01_n11,s,n11_n21\n\
n01_n11,r,n11_n10\n\
n01_n11,t,n11_n01\n\
n01_n00,t,n00_n01\n\
n01_n00,l,n00_n10\n\
n02_n12,s,n12_n22\n\
n02_n12,r,n12_n11\n\
n02_n12,t,n12_n02\n\
n02_n01,t,n01_n02\n\
n02_n01,l,n01_n11\n\
n02_n01,s,n01_n00\n\
n10_n11,s,n11_n12\n\
n10_n11,r,n11_n21\n\
n10_n11,t,n11_n10\n\
n10_n11,l,n11_n01\n\
n10_n20,l,n20_n21\n\
n10_n20,t,n20_n10\n\
n10_n00,r,n00_n01\n\
n10_n00,t,n00_n10\n\
n11_n12,r,n12_n22\n\
n11_n12,t,n12_n11\n\
n11_n12,l,n12_n02\n\
n11_n21,l,n21_n22\n\
n11_n21,r,n21_n20\n\
n11_n21,t,n21_n11\n\
n11_n10,t,n10_n11\n\
n11_n10,l,n10_n20\n\
n11_n10,r,n10_n00\n\
n11_n01,r,n01_n02\n\
n11_n01,t,n01_n11\n\
n11_n01,l,n01_n00\n\
n12_n22,r,n22_n21\n\
n12_n22,t,n22_n12\n\
n12_n11,t,n11_n12\n\
n12_n11,l,n11_n21\n\
n12_n11,s,n11_n10\n\
n12_n11,r,n11_n01\n\
n12_n02,t,n02_n12\n\
n12_n02,l,n02_n01\n\
n20_n21,s,n21_n22\n\
n20_n21,t,n21_n20\n\
n20_n21,l,n21_n11\n\
n20_n10,r,n10_n11\n\
n20_n10,t,n10_n20\n\
n20_n10,s,n10_n00\n\
n21_n22,t,n22_n21\n\
n21_n22,l,n22_n12\n\
n21_n20,t,n20_n21\n\
n21_n20,r,n20_n10\n\
n21_n11,r,n11_n12\n\
n21_n11,t,n11_n21\n\
n21_n11,l,n11_n10\n\
n21_n11,s,n11_n01\n\
n22_n21,t,n21_n22\n\
n22_n21,s,n21_n20\n\
n22_n21,r,n21_n11\n\
n22_n12,t,n12_n22\n\
n22_n12,l,n12_n11\n\
n22_n12,s,n12_n02\n\
";

/// Parse the embedded grid.
pub fn build_network() -> NetworkResult<RoadNetwork> {
    load_network_reader(Cursor::new(EDGES_CSV), Cursor::new(CONNECTIONS_CSV))
}
