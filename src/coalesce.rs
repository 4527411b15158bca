// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Greedy sort/merge coalescing of compiled points into Modbus commands.
//!
//! One engine (`run`) serves both the read and write paths; they differ only
//! in which byte-budget rule applies to a bit-addressed run (see
//! [`BudgetStrategy`]) and in the descriptor type being grouped.

use crate::area::Area;
use crate::error::Error;
use crate::pack;
use crate::point::{Point, WritePoint};

#[cfg(feature = "log")]
use log::debug;

/// A descriptor the Coalescer can sort and group: a compiled [`Point`] for
/// the read path, or a [`WritePoint`] for the write path.
pub trait RunMember {
    fn slave_id(&self) -> u8;
    fn area(&self) -> Area;
    fn start_address(&self) -> u16;
    fn n_register(&self) -> u16;
}

impl RunMember for Point {
    fn slave_id(&self) -> u8 {
        self.slave_id
    }
    fn area(&self) -> Area {
        self.area
    }
    fn start_address(&self) -> u16 {
        self.start_address
    }
    fn n_register(&self) -> u16 {
        self.n_register
    }
}

impl RunMember for WritePoint {
    fn slave_id(&self) -> u8 {
        self.point.slave_id
    }
    fn area(&self) -> Area {
        self.point.area
    }
    fn start_address(&self) -> u16 {
        self.point.start_address
    }
    fn n_register(&self) -> u16 {
        self.point.n_register
    }
}

/// Which byte-budget rule a bit-addressed (coil/discrete-input) run is
/// closed under. Register areas use a single rule regardless of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BudgetStrategy {
    Register,
    /// Coil or discrete-input read: `ceil(span / 8) < max_byte`.
    CoilRead,
    /// Coil write: write framing reserves one byte, so `span / 8 < max_byte - 1`.
    CoilWrite,
}

impl BudgetStrategy {
    fn for_area(area: Area, is_write: bool) -> Self {
        if area.is_bit_addressed() {
            if is_write {
                Self::CoilWrite
            } else {
                Self::CoilRead
            }
        } else {
            Self::Register
        }
    }

    /// `true` if a run spanning `span` address units, extended by
    /// `added_register` more, would meet or exceed `max_byte`.
    fn exceeds(self, span: u32, added_register: u32, max_byte: u16) -> bool {
        let max_byte = u32::from(max_byte);
        match self {
            Self::Register => span * 2 + added_register * 2 >= max_byte,
            Self::CoilRead => span.div_ceil(8) >= max_byte,
            Self::CoilWrite => span / 8 >= max_byte.saturating_sub(1),
        }
    }

    /// `true` if a lone point spanning `n_register` address units would, by
    /// itself, already meet or exceed the budget — the oversized-point guard
    /// applied at run-seeding time.
    fn point_is_oversized(self, n_register: u16, max_byte: u16) -> bool {
        self.exceeds(0, u32::from(n_register), max_byte)
    }
}

/// One coalesced run: a contiguous (or overlapping) span of points sharing a
/// slave and area.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Run<T> {
    slave_id: u8,
    area: Area,
    start_address: u16,
    n_register: u16,
    tags: Vec<T>,
}

fn run<T: RunMember + Clone>(
    mut items: Vec<T>,
    max_byte: u16,
    is_write: bool,
) -> Result<Vec<Run<T>>, Error> {
    items.sort_by_key(|t| (t.slave_id(), t.area(), t.start_address(), t.n_register()));

    let mut runs: Vec<Run<T>> = Vec::new();
    for item in items {
        let strategy = BudgetStrategy::for_area(item.area(), is_write);

        if strategy.point_is_oversized(item.n_register(), max_byte) {
            return Err(Error::OversizedPoint {
                area: item.area(),
                n_register: item.n_register(),
                max_byte,
            });
        }

        let extends_current = runs.last().is_some_and(|run| {
            run.slave_id == item.slave_id()
                && run.area == item.area()
                && u32::from(item.start_address())
                    <= u32::from(run.start_address) + u32::from(run.n_register)
                && !strategy.exceeds(
                    u32::from(run.n_register),
                    u32::from(item.n_register()),
                    max_byte,
                )
        });

        if extends_current {
            let run = runs.last_mut().expect("checked above");
            let run_start = u32::from(run.start_address);
            let new_end = (run_start + u32::from(run.n_register))
                .max(u32::from(item.start_address()) + u32::from(item.n_register()));
            run.n_register = (new_end - run_start) as u16;
            run.tags.push(item);
        } else {
            #[cfg(feature = "log")]
            if let Some(prev) = runs.last() {
                debug!(
                    "closing run slave={} area={:?} start={} n_register={} before {:?}",
                    prev.slave_id, prev.area, prev.start_address, prev.n_register, item.area()
                );
            }
            runs.push(Run {
                slave_id: item.slave_id(),
                area: item.area(),
                start_address: item.start_address(),
                n_register: item.n_register(),
                tags: vec![item],
            });
        }
    }
    Ok(runs)
}

/// A coalesced read request: one `ReadHoldingRegisters`/`ReadCoils`/... PDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCmd {
    pub slave_id: u8,
    pub area: Area,
    pub start_address: u16,
    pub n_register: u16,
    pub tags: Vec<Point>,
}

/// A coalesced write request: a [`ReadCmd`]-shaped address range plus the
/// serialized payload the Write Packer produced for it.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteCmd {
    pub slave_id: u8,
    pub area: Area,
    pub start_address: u16,
    pub n_register: u16,
    pub n_byte: u16,
    pub payload: Vec<u8>,
    pub tags: Vec<WritePoint>,
}

/// Coalesce compiled read points into the minimal ordered set of
/// [`ReadCmd`]s, under the per-request byte budget `max_byte`.
pub fn coalesce_read(points: Vec<Point>, max_byte: u16) -> Result<Vec<ReadCmd>, Error> {
    run(points, max_byte, false).map(|runs| {
        runs.into_iter()
            .map(|r| ReadCmd {
                slave_id: r.slave_id,
                area: r.area,
                start_address: r.start_address,
                n_register: r.n_register,
                tags: r.tags,
            })
            .collect()
    })
}

/// Coalesce write points into the minimal ordered set of [`WriteCmd`]s,
/// packing each run's payload via the Write Packer.
pub fn coalesce_write(
    points: Vec<WritePoint>,
    max_byte: u16,
    defaults: pack::EndianDefaults,
) -> Result<Vec<WriteCmd>, Error> {
    run(points, max_byte, true)?
        .into_iter()
        .map(|r| {
            let (payload, n_byte) = pack::pack_write_run(r.area, r.start_address, &r.tags, defaults)?;
            Ok(WriteCmd {
                slave_id: r.slave_id,
                area: r.area,
                start_address: r.start_address,
                n_register: r.n_register,
                n_byte,
                payload,
                tags: r.tags,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressBase;
    use crate::point::{compile_point, Attribute, TagRecord};
    use crate::scalar::ScalarType;

    fn read_point(address: &str, ty: ScalarType) -> Point {
        let tag = TagRecord::new("tag", address, ty, Attribute::READ);
        compile_point(&tag, AddressBase::One).unwrap()
    }

    #[test]
    fn single_holding_register_read() {
        let cmds = coalesce_read(vec![read_point("1!40001", ScalarType::Int16)], 250).unwrap();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].slave_id, 1);
        assert_eq!(cmds[0].area, Area::HoldRegister);
        assert_eq!(cmds[0].start_address, 0);
        assert_eq!(cmds[0].n_register, 1);
    }

    #[test]
    fn three_adjacent_registers_coalesce() {
        let points = vec![
            read_point("1!40003", ScalarType::Int16),
            read_point("1!40001", ScalarType::Int16),
            read_point("1!40002", ScalarType::Int16),
        ];
        let cmds = coalesce_read(points, 250).unwrap();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].start_address, 0);
        assert_eq!(cmds[0].n_register, 3);
    }

    #[test]
    fn slave_boundary_splits_commands() {
        let points = vec![
            read_point("1!40001", ScalarType::Int16),
            read_point("2!40001", ScalarType::Int16),
        ];
        let cmds = coalesce_read(points, 250).unwrap();
        assert_eq!(cmds.len(), 2);
        let slaves: Vec<u8> = cmds.iter().map(|c| c.slave_id).collect();
        assert_eq!(slaves, vec![1, 2]);
    }

    #[test]
    fn byte_budget_splits_a_long_run() {
        let points: Vec<Point> = (1..=126)
            .map(|i| read_point(&format!("1!4{:05}", i), ScalarType::Int16))
            .collect();
        let cmds = coalesce_read(points, 250).unwrap();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].n_register, 124);
        assert_eq!(cmds[1].n_register, 2);
    }

    #[test]
    fn oversized_single_point_is_rejected() {
        let t = TagRecord::new("tag", "1!40001.bytes(128)", ScalarType::Bytes, Attribute::READ);
        let point = compile_point(&t, AddressBase::One).unwrap();
        assert_eq!(point.n_register, 64);
        let err = coalesce_read(vec![point], 100).unwrap_err();
        assert!(matches!(err, Error::OversizedPoint { .. }));
    }

    #[test]
    fn overlapping_points_are_preserved_not_deduplicated() {
        let points = vec![
            read_point("1!40001", ScalarType::Int16),
            read_point("1!40001", ScalarType::Uint16),
        ];
        let cmds = coalesce_read(points, 250).unwrap();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].tags.len(), 2);
        assert_eq!(cmds[0].n_register, 1);
    }
}
