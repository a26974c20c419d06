use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;
use tempfile::{tempdir, TempDir};

use splot::prelude::*;
use splot::{Error, PlotSession, SessionState};

fn temp_dir() -> TempDir {
    tempdir().unwrap()
}

fn script_of(session: &PlotSession) -> String {
    String::from_utf8_lossy(&session.script()).into_owned()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

fn verify_file(path: &PathBuf) {
    assert!(
        path.is_file(),
        "File {:?} does not exist or is not a file",
        path
    );
    assert!(path.metadata().unwrap().len() > 0);
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    File::create(&path)
        .unwrap()
        .write_all(contents.as_bytes())
        .unwrap();
    path
}

#[test]
fn flat_inputs_make_one_unchanged_series() {
    let session = splot::line(vec![1., 2.], vec![5., 6.])
        .no_display()
        .draw()
        .unwrap();

    assert_eq!(session.series_count(), 1);
    let (xs, ys) = session.series_values(session.handles()[0]).unwrap();
    assert_relative_eq!(xs[0], 1.);
    assert_relative_eq!(xs[1], 2.);
    assert_relative_eq!(ys[0], 5.);
    assert_relative_eq!(ys[1], 6.);
}

#[test]
fn shared_x_is_broadcast_and_clipped_per_series() {
    let session = splot::line(vec![1., 2., 3.], vec![vec![5., 6., 7.], vec![8., 9.]])
        .no_display()
        .draw()
        .unwrap();

    assert_eq!(session.series_count(), 2);
    let (xs, ys) = session.series_values(session.handles()[1]).unwrap();
    assert_eq!(xs, &[1., 2.]);
    assert_eq!(ys, &[8., 9.]);
}

#[test]
fn nested_inputs_pair_positionally() {
    let session = splot::line(
        vec![vec![1., 2.], vec![3., 4.]],
        vec![vec![5., 6.], vec![6., 7.]],
    )
    .no_display()
    .draw()
    .unwrap();

    assert_eq!(session.series_count(), 2);
    let (xs, _) = session.series_values(session.handles()[1]).unwrap();
    assert_eq!(xs, &[3., 4.]);
}

#[test]
fn mismatched_series_counts_are_rejected() {
    let err = splot::line(vec![vec![1., 2.], vec![3., 4.]], vec![5., 6.])
        .no_display()
        .draw()
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { x: 2, y: 1 }));

    let err = splot::line(
        vec![vec![1., 2.], vec![3., 4.], vec![5., 6.]],
        vec![vec![5., 6.], vec![6., 7.]],
    )
    .no_display()
    .draw()
    .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { x: 3, y: 2 }));
}

#[test]
fn short_x_is_not_padded() {
    let err = splot::line(vec![1.], vec![5., 6.])
        .no_display()
        .draw()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::SeriesTooShort {
            index: 0,
            x: 1,
            y: 2
        }
    ));
}

#[test]
fn scatter_shapes() {
    let x1 = vec![1., 2.];
    let x2 = vec![3., 4.];
    let y1 = vec![5., 6.];
    let y2 = vec![6., 7.];

    let session = splot::scatter(x1.clone(), y1.clone())
        .no_display()
        .draw()
        .unwrap();
    assert_eq!(session.series_count(), 1);

    let session = splot::scatter(x1.clone(), vec![y1.clone(), y2.clone()])
        .no_display()
        .draw()
        .unwrap();
    assert_eq!(session.series_count(), 2);

    let session = splot::scatter(vec![x1.clone(), x2.clone()], vec![y1.clone(), y2.clone()])
        .no_display()
        .draw()
        .unwrap();
    assert_eq!(session.series_count(), 2);

    let err = splot::scatter(vec![x1, x2], y1)
        .no_display()
        .draw()
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { x: 2, y: 1 }));
}

#[test]
fn categorical_x_becomes_tick_positions() {
    let session = splot::line(vec!["a", "b", "c"], vec![1., 2., 3.])
        .no_display()
        .draw()
        .unwrap();

    let (xs, _) = session.series_values(session.handles()[0]).unwrap();
    assert_eq!(xs, &[0., 1., 2.]);

    let script = script_of(&session);
    assert!(script.contains("set xtics nomirror ('a' 0, 'b' 1, 'c' 2)"));
}

#[test]
fn tick_substitution_is_idempotent_across_adds() {
    let session = splot::line(vec!["a", "b", "c"], vec![1., 2., 3.])
        .no_display()
        .draw()
        .unwrap();
    let session = splot::line(vec!["a", "b", "c"], vec![4., 5., 6.])
        .extend(session)
        .no_display()
        .draw()
        .unwrap();

    assert_eq!(session.series_count(), 2);
    assert_eq!(session.subplot_count(), 1);
    let script = script_of(&session);
    assert_eq!(count(&script, "('a' 0, 'b' 1, 'c' 2)"), 1);
}

#[test]
fn rotated_tick_labels_are_emitted_vertically() {
    let session = splot::line(vec!["a", "b"], vec![1., 2.])
        .style(StyleConfig::default().rotate_tick_labels())
        .no_display()
        .draw()
        .unwrap();

    assert!(script_of(&session).contains("rotate by 90 right"));
}

#[test]
fn categorical_x_on_log_axis_fails_fast() {
    let err = splot::line(vec!["a", "b"], vec![1., 2.])
        .configure(Axis::X, |a| a.set(Scale::Logarithmic))
        .no_display()
        .draw()
        .unwrap_err();
    assert!(matches!(err, Error::LogScaleLabels));
}

#[test]
fn categorical_x_on_scatter_fails_fast() {
    let err = splot::scatter(vec!["a", "b"], vec![1., 2.])
        .no_display()
        .draw()
        .unwrap_err();
    assert!(matches!(err, Error::ScatterLabels));
}

#[test]
fn non_numeric_y_is_fatal() {
    let err = splot::line(vec![1., 2.], vec!["a", "b"])
        .no_display()
        .draw()
        .unwrap_err();
    assert!(matches!(err, Error::NonNumericOrdinate { index: 0 }));
}

#[test]
fn scale_flags_select_the_delegate_primitive() {
    let x = vec![1., 10.];
    let y = vec![1., 100.];

    let script = script_of(
        &splot::line(x.clone(), y.clone())
            .no_display()
            .draw()
            .unwrap(),
    );
    assert!(script.contains("unset logscale x"));
    assert!(script.contains("unset logscale y"));

    let script = script_of(
        &splot::line(x.clone(), y.clone())
            .configure(Axis::X, |a| a.set(Scale::Logarithmic))
            .no_display()
            .draw()
            .unwrap(),
    );
    assert!(script.contains("set logscale x"));
    assert!(script.contains("unset logscale y"));

    let script = script_of(
        &splot::line(x.clone(), y.clone())
            .configure(Axis::Y, |a| a.set(Scale::Logarithmic))
            .no_display()
            .draw()
            .unwrap(),
    );
    assert!(script.contains("unset logscale x"));
    assert!(script.contains("set logscale y"));

    let script = script_of(
        &splot::line(x, y)
            .configure(Axis::X, |a| a.set(Scale::Logarithmic))
            .configure(Axis::Y, |a| a.set(Scale::Logarithmic))
            .no_display()
            .draw()
            .unwrap(),
    );
    assert!(script.contains("set logscale x"));
    assert!(script.contains("set logscale y"));
}

#[test]
fn dash_cycle_restarts_on_each_line_call() {
    let style = StyleConfig::default().dash_cycle(vec![
        DashStyle(vec![2., 2.]),
        DashStyle(vec![10., 5.]),
    ]);

    let session = splot::line(
        vec![1., 2.],
        vec![vec![1., 2.], vec![2., 3.], vec![3., 4.]],
    )
    .style(style)
    .no_display()
    .draw()
    .unwrap();

    let script = script_of(&session);
    assert_eq!(count(&script, "dt (2,2)"), 2);
    assert_eq!(count(&script, "dt (10,5)"), 1);

    // A new call resets the rotation, so the fourth series dashes like the
    // first.
    let session = splot::line(vec![1., 2.], vec![4., 5.])
        .extend(session)
        .no_display()
        .draw()
        .unwrap();
    let script = script_of(&session);
    assert_eq!(count(&script, "dt (2,2)"), 3);
    assert_eq!(count(&script, "dt (10,5)"), 1);
}

#[test]
fn direct_session_adds_keep_cycling() {
    let style = StyleConfig::default().dash_cycle(vec![
        DashStyle(vec![2., 2.]),
        DashStyle(vec![10., 5.]),
    ]);
    let mut session = PlotSession::new("", style);
    let subplot = session.add_plot("", "", false, false);

    for ys in &[vec![1., 2.], vec![2., 3.], vec![3., 4.]] {
        session
            .add_line(subplot, Series::numeric(vec![1., 2.], ys.clone()), None, None)
            .unwrap();
    }

    let script = script_of(&session);
    assert_eq!(count(&script, "dt (2,2)"), 2);
    assert_eq!(count(&script, "dt (10,5)"), 1);
}

#[test]
fn session_walks_through_its_states() {
    let mut session = PlotSession::new("states", StyleConfig::default());
    assert_eq!(session.state(), SessionState::Created);

    let subplot = session.add_plot("x", "y", false, false);
    assert_eq!(session.state(), SessionState::Configured);

    session
        .add_line(
            subplot,
            Series::numeric(vec![1., 2.], vec![3., 4.]),
            None,
            None,
        )
        .unwrap();
    assert_eq!(session.state(), SessionState::Populated);

    session.reveal(false, &[]).unwrap();
    assert_eq!(session.state(), SessionState::Finalized);
}

#[test]
fn revealing_an_empty_session_is_rejected() {
    let mut session = PlotSession::new("empty", StyleConfig::default());
    assert!(matches!(
        session.reveal(false, &[]),
        Err(Error::EmptySession)
    ));
}

#[test]
fn legend_must_cover_every_series_or_none() {
    let err = splot::line(vec![1., 2.], vec![vec![1., 2.], vec![2., 3.]])
        .set(Legend(vec!["only one"]))
        .no_display()
        .draw()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::LegendMismatch {
            legends: 1,
            series: 2
        }
    ));

    let session = splot::line(vec![1., 2.], vec![vec![1., 2.], vec![2., 3.]])
        .set(Legend(vec!["first", "second"]))
        .no_display()
        .draw()
        .unwrap();
    let script = script_of(&session);
    assert!(script.contains("title 'first'"));
    assert!(script.contains("title 'second'"));

    let session = splot::line(vec![1., 2.], vec![1., 2.])
        .no_display()
        .draw()
        .unwrap();
    assert!(script_of(&session).contains("notitle"));
}

#[test]
fn partially_legended_session_is_rejected_at_reveal() {
    let mut session = PlotSession::new("", StyleConfig::default());
    let subplot = session.add_plot("", "", false, false);
    session
        .add_line(
            subplot,
            Series::numeric(vec![1., 2.], vec![1., 2.]),
            Some("labelled"),
            None,
        )
        .unwrap();
    session
        .add_line(
            subplot,
            Series::numeric(vec![1., 2.], vec![2., 3.]),
            None,
            None,
        )
        .unwrap();

    assert!(matches!(
        session.reveal(false, &[]),
        Err(Error::LegendMismatch {
            legends: 1,
            series: 2
        })
    ));
}

#[test]
fn legend_outside_reduces_the_right_margin() {
    let style = StyleConfig::default().place_legend_outside(20.);
    let session = splot::line(vec![1., 2.], vec![1., 2.])
        .set(Legend(vec!["series"]))
        .style(style)
        .no_display()
        .draw()
        .unwrap();

    let script = script_of(&session);
    assert!(script.contains("set key on outside top right"));
    assert!(script.contains("set rmargin at screen 0.8"));
}

#[test]
fn line_width_override_applies_to_every_handle() {
    let style = StyleConfig::default().line_width(3.);
    let session = splot::line(vec![1., 2.], vec![vec![1., 2.], vec![2., 3.]])
        .style(style)
        .no_display()
        .draw()
        .unwrap();

    assert_eq!(count(&script_of(&session), "lw 3"), 2);
}

#[test]
fn extents_limit_the_axes() {
    let style = StyleConfig::default().extents(Some((0., 10.)), Some((-1., 1.)));
    let session = splot::line(vec![1., 2.], vec![1., 2.])
        .style(style)
        .no_display()
        .draw()
        .unwrap();

    let script = script_of(&session);
    assert!(script.contains("set xrange [0:10]"));
    assert!(script.contains("set yrange [-1:1]"));
}

#[test]
fn vlines_are_drawn_with_the_configured_pen() {
    let style = StyleConfig::default().vline_config(Some(2.), Some(Color::Red));
    let session = splot::line(vec![1., 2.], vec![1., 2.])
        .style(style)
        .vlines(&[1.5])
        .no_display()
        .draw()
        .unwrap();

    let script = script_of(&session);
    assert!(script.contains("set arrow from 1.5, graph 0 to 1.5, graph 1 nohead lw 2 lc rgb 'red'"));
}

#[test]
fn draw_axes_adds_zero_axis_lines() {
    let session = splot::line(vec![-1., 1.], vec![-1., 1.])
        .draw_axes()
        .no_display()
        .draw()
        .unwrap();

    let script = script_of(&session);
    assert!(script.contains("set xzeroaxis lt -1"));
    assert!(script.contains("set yzeroaxis lt -1"));
}

#[test]
fn markers_layer_onto_the_line_style() {
    let session = splot::line(vec![1., 2.], vec![1., 2.])
        .set(MarkerSize(2.))
        .no_display()
        .draw()
        .unwrap();
    let script = script_of(&session);
    assert!(script.contains("with points"));
    assert!(script.contains("pt 7"));
    assert!(script.contains("ps 2"));

    let session = splot::line(vec![1., 2.], vec![1., 2.])
        .set(MarkerSize(2.))
        .mark_with_line()
        .no_display()
        .draw()
        .unwrap();
    assert!(script_of(&session).contains("with linespoints"));
}

#[test]
fn per_series_marker_sizes_pair_positionally() {
    let session = splot::line(vec![1., 2.], vec![vec![1., 2.], vec![2., 3.]])
        .set(MarkerSizes(vec![1., 4.]))
        .no_display()
        .draw()
        .unwrap();

    let script = script_of(&session);
    assert!(script.contains("ps 1"));
    assert!(script.contains("ps 4"));

    let err = splot::line(vec![1., 2.], vec![vec![1., 2.], vec![2., 3.]])
        .set(MarkerSizes(vec![1.]))
        .no_display()
        .draw()
        .unwrap_err();
    assert!(matches!(err, Error::ConfigConflict(_)));
}

#[test]
fn scatter_advances_the_colour_cycle_per_series() {
    let session = splot::scatter(vec![1., 2.], vec![vec![1., 2.], vec![2., 3.]])
        .no_display()
        .draw()
        .unwrap();

    let script = script_of(&session);
    assert!(script.contains("lc rgb '#1f77b4'"));
    assert!(script.contains("lc rgb '#aec7e8'"));

    // The rotation restarts on the next scatter call.
    let session = splot::scatter(vec![1., 2.], vec![3., 4.])
        .extend(session)
        .no_display()
        .draw()
        .unwrap();
    assert_eq!(count(&script_of(&session), "lc rgb '#1f77b4'"), 2);
}

#[test]
fn reusing_a_session_accumulates_series_on_one_figure() {
    let session = splot::line(vec![1., 2.], vec![1., 2.])
        .no_display()
        .draw()
        .unwrap();
    let session = splot::line(vec![1., 2.], vec![2., 3.])
        .extend(session)
        .no_display()
        .draw()
        .unwrap();

    assert_eq!(session.subplot_count(), 1);
    assert_eq!(session.series_count(), 2);
    assert_eq!(session.state(), SessionState::Finalized);
}

#[test]
fn reconfiguring_a_reused_session_is_rejected() {
    let session = splot::line(vec![1., 2.], vec![1., 2.])
        .no_display()
        .draw()
        .unwrap();

    let err = splot::line(vec![1., 2.], vec![2., 3.])
        .extend(session)
        .set(Title("too late"))
        .no_display()
        .draw()
        .unwrap_err();
    assert!(matches!(err, Error::ConfigConflict(_)));
}

#[test]
fn subplot_grids_emit_a_multiplot_layout() {
    let mut session = PlotSession::with_grid("grid", 1, 2, StyleConfig::default());
    let left = session.add_plot("t", "a", false, false);
    let right = session.add_plot("t", "b", false, true);

    session
        .add_line(left, Series::numeric(vec![1., 2.], vec![1., 2.]), None, None)
        .unwrap();
    session
        .add_line(
            right,
            Series::numeric(vec![1., 2.], vec![1., 100.]),
            None,
            None,
        )
        .unwrap();
    session.reveal(false, &[]).unwrap();

    let script = script_of(&session);
    assert!(script.contains("set multiplot layout 1,2"));
    assert!(script.contains("unset multiplot"));
    assert!(script.contains("set logscale y"));
}

#[test]
fn addressing_a_missing_subplot_fails() {
    let mut with_subplot = PlotSession::new("", StyleConfig::default());
    with_subplot.add_plot("", "", false, false);

    let mut session = PlotSession::new("", StyleConfig::default());
    let foreign = with_subplot.first_subplot().unwrap();
    let err = session
        .add_line(
            foreign,
            Series::numeric(vec![1., 2.], vec![1., 2.]),
            None,
            None,
        )
        .unwrap_err();
    assert!(matches!(err, Error::NoSuchSubplot(0)));
}

#[test]
fn style_config_round_trips_through_serde() {
    let style = StyleConfig::default()
        .dash_cycle(vec![DashStyle(vec![2., 2.])])
        .colour_cycle(colour_cycle(4, 0.5))
        .line_width(2.);

    let json = serde_json::to_string(&style).unwrap();
    let back: StyleConfig = serde_json::from_str(&json).unwrap();
    let rejson = serde_json::to_string(&back).unwrap();
    assert_eq!(json, rejson);
}

#[test]
fn delimited_files_share_one_x_per_y_column() {
    let dir = temp_dir();
    let path = write_file(&dir, "data.csv", "0,1,4\n1,2,5\n2,3,6\n");

    let session = splot::line_from_csv(&path, 0, &[1, 2])
        .unwrap()
        .no_display()
        .draw()
        .unwrap();

    assert_eq!(session.series_count(), 2);
    let (xs, ys) = session.series_values(session.handles()[0]).unwrap();
    assert_eq!(xs, &[0., 1., 2.]);
    assert_eq!(ys, &[1., 2., 3.]);
    let (xs, ys) = session.series_values(session.handles()[1]).unwrap();
    assert_eq!(xs, &[0., 1., 2.]);
    assert_eq!(ys, &[4., 5., 6.]);
}

#[test]
fn space_delimited_files_collapse_runs_of_spaces() {
    let dir = temp_dir();
    let path = write_file(&dir, "data.txt", "0  1\n1   2\n");

    let session = splot::line_from_file(&path, b' ', 0, &[1])
        .unwrap()
        .no_display()
        .draw()
        .unwrap();

    let (xs, ys) = session.series_values(session.handles()[0]).unwrap();
    assert_eq!(xs, &[0., 1.]);
    assert_eq!(ys, &[1., 2.]);
}

#[test]
fn several_files_concatenate_their_series() {
    let dir = temp_dir();
    let first = write_file(&dir, "a.csv", "0,1\n1,2\n");
    let second = write_file(&dir, "b.csv", "0,5\n1,6\n2,7\n");

    let session = splot::line_from_files(&[first, second], b',', 0, &[1])
        .unwrap()
        .no_display()
        .draw()
        .unwrap();

    assert_eq!(session.series_count(), 2);
    let (xs, _) = session.series_values(session.handles()[1]).unwrap();
    assert_eq!(xs, &[0., 1., 2.]);
}

#[test]
fn malformed_rows_fail_the_whole_load() {
    let dir = temp_dir();
    let path = write_file(&dir, "bad.csv", "0,1\nnot,anumber\n");

    let err = splot::line_from_csv(&path, 0, &[1]).unwrap_err();
    assert!(matches!(err, Error::Parse { record: 1, .. }));
}

#[test]
fn short_rows_fail_the_whole_load() {
    let dir = temp_dir();
    let path = write_file(&dir, "short.csv", "0,1\n1\n");

    let err = splot::line_from_csv(&path, 0, &[1]).unwrap_err();
    assert!(matches!(err, Error::ColumnMissing { record: 1, index: 1, .. }));
}

#[test]
fn overlapping_column_selection_is_rejected() {
    let dir = temp_dir();
    let path = write_file(&dir, "data.csv", "0,1\n");

    let err = splot::line_from_csv(&path, 0, &[0, 1]).unwrap_err();
    assert!(matches!(err, Error::ColumnOverlap(0)));
}

#[test]
fn saving_without_display_produces_the_file() {
    if splot::version().is_err() {
        return;
    }

    let dir = temp_dir();
    let path = dir.path().join("out.svg");
    splot::line(vec![1., 2.], vec![5., 6.])
        .set(Output(path.clone()))
        .no_display()
        .draw()
        .unwrap();

    verify_file(&path);
}

#[test]
fn headless_style_saves_without_opening_a_window() {
    if splot::version().is_err() {
        return;
    }

    let dir = temp_dir();
    let path = dir.path().join("headless.svg");
    splot::line(vec![1., 2.], vec![5., 6.])
        .style(StyleConfig::default().headless())
        .set(Output(path.clone()))
        .draw()
        .unwrap();

    verify_file(&path);
}
