//! Tests for tr-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, DEADLINE_FILE, SKIPS_FILE};
    use crate::row::{DeadlineRow, SkipRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn deadline_row(tick: u64) -> DeadlineRow {
        DeadlineRow {
            tick,
            time_secs:     tick as f64 * 0.5,
            vehicles:      4,
            mean_deadline: 12.5,
            fallbacks:     1,
            skipped:       0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(DEADLINE_FILE).exists());
        assert!(dir.path().join(SKIPS_FILE).exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(DEADLINE_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "time_secs", "vehicles", "mean_deadline", "fallbacks", "skipped"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join(SKIPS_FILE)).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["tick", "vehicle_id", "edge"]);
    }

    #[test]
    fn csv_deadline_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_deadline(&deadline_row(0)).unwrap();
        w.write_deadline(&deadline_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(DEADLINE_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "3");    // tick
        assert_eq!(&rows[1][1], "1.5");  // time_secs
        assert_eq!(&rows[1][3], "12.5"); // mean_deadline
        assert_eq!(&rows[1][4], "1");    // fallbacks
    }

    #[test]
    fn csv_skip_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![
            SkipRow { tick: 2, vehicle_id: "veh_a".into(), edge: 99 },
            SkipRow { tick: 2, vehicle_id: "veh_b".into(), edge: u32::MAX },
        ];
        w.write_skips(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SKIPS_FILE)).unwrap();
        let read: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read.len(), 2);
        assert_eq!(&read[0][1], "veh_a");
        assert_eq!(&read[0][2], "99");
        assert_eq!(&read[1][2], "4294967295");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_directory_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use tr_core::{Direction, EdgeId, SimClock, Tick, Vehicle, VehicleId};
    use tr_decide::{
        DeadlineCongestionStrategy, DiagnosticsSink, EngineBuilder, EngineConfig, SkipReason,
        TickSample,
    };
    use tr_network::{InMemoryState, RoadNetworkBuilder};

    use crate::{CsvWriter, DeadlineRow, OutputError, OutputResult, OutputWriter, SinkOutput, SkipRow};

    /// Keeps rows in memory; optionally fails every write.
    #[derive(Default)]
    struct MemWriter {
        deadlines: Vec<DeadlineRow>,
        skips:     Vec<SkipRow>,
        finished:  usize,
        fail:      bool,
    }

    impl OutputWriter for MemWriter {
        fn write_deadline(&mut self, row: &DeadlineRow) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.deadlines.push(*row);
            Ok(())
        }

        fn write_skips(&mut self, rows: &[SkipRow]) -> OutputResult<()> {
            self.skips.extend_from_slice(rows);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    fn sample(tick: u64) -> TickSample {
        TickSample {
            tick:          Tick(tick),
            time_secs:     tick as f64,
            vehicles:      3,
            mean_deadline: 7.0,
            fallbacks:     0,
            skipped:       1,
        }
    }

    #[test]
    fn skips_are_written_with_their_tick() {
        let mut out = SinkOutput::new(MemWriter::default());
        let reason = SkipReason::UnknownVehicleState { edge: EdgeId(5) };
        out.on_skip(Tick(1), &VehicleId::from("lost"), &reason);
        out.on_tick(&sample(1));
        out.on_run_end();

        assert!(out.take_error().is_none());
        let w = out.into_writer();
        assert_eq!(w.deadlines.len(), 1);
        assert_eq!(w.deadlines[0].tick, 1);
        assert_eq!(w.skips, vec![SkipRow { tick: 1, vehicle_id: "lost".into(), edge: 5 }]);
        assert_eq!(w.finished, 1);
    }

    #[test]
    fn first_error_is_kept() {
        let mut out = SinkOutput::new(MemWriter { fail: true, ..MemWriter::default() });
        out.on_tick(&sample(0));
        out.on_tick(&sample(1));
        let err = out.take_error().unwrap();
        assert!(err.to_string().contains("disk full"));
        assert!(out.take_error().is_none());
    }

    #[test]
    fn engine_writes_deadline_series_csv() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_edge("a", 60.0).unwrap();
        let c = b.add_edge("c", 60.0).unwrap();
        b.connect(a, Direction::Straight, c).unwrap();
        let network = b.build();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let state = InMemoryState::new(SimClock::new(0.0, 2.0).unwrap());
        let mut engine = EngineBuilder::new(DeadlineCongestionStrategy::new(EngineConfig::default()), state)
            .sink(SinkOutput::new(writer))
            .build()
            .unwrap();

        let batch = [Vehicle::new("v1", a, c, 10.0), Vehicle::new("v2", EdgeId(9), c, 30.0)];
        for _ in 0..3 {
            engine.make_decisions(&batch, &network).unwrap();
            engine.state_mut().advance();
        }
        engine.finish();
        assert!(engine.sink_mut().take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join(crate::csv::DEADLINE_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[2][0], "2");  // tick
        assert_eq!(&rows[2][1], "4");  // 2 ticks * 2 s
        assert_eq!(&rows[2][3], "20"); // mean of 10 and 30
        assert_eq!(&rows[2][5], "1");  // skipped

        let mut rdr = csv::Reader::from_path(dir.path().join(crate::csv::SKIPS_FILE)).unwrap();
        assert_eq!(rdr.records().count(), 3);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{DeadlineRow, SkipRow};
    use crate::sqlite::{DB_FILE, SqliteWriter};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(DB_FILE).exists());
    }

    #[test]
    fn sqlite_deadline_series() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        for tick in 0..4 {
            w.write_deadline(&DeadlineRow {
                tick,
                time_secs:     tick as f64,
                vehicles:      2,
                mean_deadline: 10.0 - tick as f64,
                fallbacks:     0,
                skipped:       0,
            })
            .unwrap();
        }
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join(DB_FILE)).unwrap();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM deadline_series", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 4);
        let last: f64 = conn
            .query_row("SELECT mean_deadline FROM deadline_series WHERE tick = 3", [], |r| r.get(0))
            .unwrap();
        assert_eq!(last, 7.0);
    }

    #[test]
    fn sqlite_skips() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_skips(&[SkipRow { tick: 1, vehicle_id: "x".into(), edge: 42 }]).unwrap();
        w.write_skips(&[]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join(DB_FILE)).unwrap();
        let (id, edge): (String, i64) = conn
            .query_row("SELECT vehicle_id, edge FROM skipped_vehicles", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!(id, "x");
        assert_eq!(edge, 42);
    }

    #[test]
    fn sqlite_second_run_replaces_the_first() {
        let dir = tmp();
        let row = DeadlineRow {
            tick:          0,
            time_secs:     0.0,
            vehicles:      1,
            mean_deadline: 5.0,
            fallbacks:     0,
            skipped:       0,
        };
        for run in 0..2 {
            let mut w = SqliteWriter::new(dir.path()).unwrap();
            w.write_deadline(&DeadlineRow { vehicles: run + 1, ..row }).unwrap();
            w.write_skips(&[SkipRow { tick: 0, vehicle_id: format!("run{run}"), edge: 1 }]).unwrap();
            w.finish().unwrap();
        }

        let conn = rusqlite::Connection::open(dir.path().join(DB_FILE)).unwrap();
        let (count, vehicles): (i64, i64) = conn
            .query_row("SELECT COUNT(*), MAX(vehicles) FROM deadline_series", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!((count, vehicles), (1, 2));
        let id: String =
            conn.query_row("SELECT vehicle_id FROM skipped_vehicles", [], |r| r.get(0)).unwrap();
        assert_eq!(id, "run1");
    }
}
