use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

const HEAT_LOW: (u8, u8, u8) = (247, 251, 255);
const HEAT_HIGH: (u8, u8, u8) = (8, 48, 107);

fn heat_color(value: f64, min: f64, max: f64) -> RGBColor {
    let span = (max - min).max(f64::EPSILON);
    let t = ((value - min) / span).clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(
        lerp(HEAT_LOW.0, HEAT_HIGH.0),
        lerp(HEAT_LOW.1, HEAT_HIGH.1),
        lerp(HEAT_LOW.2, HEAT_HIGH.2),
    )
}

/// Renders the target x query bit-score heatmap.
///
/// # Arguments
///
/// * `targets` - Row labels, one per matrix row.
/// * `queries` - Column labels, one per matrix column.
/// * `scores` - `scores[row][col]`; `None` cells are left blank.
/// * `output_path` - PNG destination.
pub fn plot_score_heatmap(
    targets: &[String],
    queries: &[String],
    scores: &[Vec<Option<f64>>],
    output_path: &Path,
) -> Result<()> {
    if targets.is_empty() || queries.is_empty() {
        return Err(anyhow::anyhow!("No hit data available for plotting"));
    }

    let observed: Vec<f64> = scores.iter().flatten().filter_map(|s| *s).collect();
    if observed.is_empty() {
        return Err(anyhow::anyhow!("No hit data available for plotting"));
    }
    let min_score = observed.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_score = observed.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let n_rows = targets.len() as i32;
    let n_cols = queries.len() as i32;

    let root = BitMapBackend::new(output_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("HMMer Output Heatmap", ("sans-serif", 20))
        .x_label_area_size(60)
        .y_label_area_size(220)
        .build_cartesian_2d(0..n_cols, 0..n_rows)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(queries.len().min(20))
        .y_labels(targets.len().min(30))
        .x_label_formatter(&|col| {
            queries
                .get(*col as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_label_formatter(&|row| {
            targets
                .get(*row as usize)
                .cloned()
                .unwrap_or_default()
        })
        .x_desc("Query Name")
        .y_desc("Target Name")
        .draw()?;

    chart.draw_series(scores.iter().enumerate().flat_map(|(row, cols)| {
        cols.iter().enumerate().filter_map(move |(col, score)| {
            score.map(|s| {
                Rectangle::new(
                    [(col as i32, row as i32), (col as i32 + 1, row as i32 + 1)],
                    heat_color(s, min_score, max_score).filled(),
                )
            })
        })
    }))?;

    root.present()?;
    Ok(())
}

/// Renders a horizontal bar chart of the highest-scoring hits,
/// best hit at the top.
///
/// # Arguments
///
/// * `hits` - (target name, bit score) pairs, sorted by descending score.
/// * `output_path` - PNG destination.
pub fn plot_top_hits(hits: &[(String, f64)], output_path: &Path) -> Result<()> {
    if hits.is_empty() {
        return Err(anyhow::anyhow!("No hit data available for plotting"));
    }

    let n = hits.len() as i32;
    let max_score = hits
        .iter()
        .map(|(_, score)| *score)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(f64::EPSILON);

    let root = BitMapBackend::new(output_path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Top {} Hits by Score", hits.len()), ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(220)
        .build_cartesian_2d(0.0..max_score * 1.05, 0..n)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(hits.len())
        .y_label_formatter(&|row| {
            let rank = (n - 1 - *row) as usize;
            hits.get(rank).map(|(name, _)| name.clone()).unwrap_or_default()
        })
        .x_desc("Score")
        .y_desc("Target Name")
        .draw()?;

    chart.draw_series(hits.iter().enumerate().map(|(rank, (_, score))| {
        let row = n - 1 - rank as i32; // best hit drawn at the top
        Rectangle::new([(0.0, row), (*score, row + 1)], BLUE.mix(0.7).filled())
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_plot_score_heatmap() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("heatmap.png");
        let targets = vec!["WBGene00003204.1".to_string(), "WBGene00006413.1".to_string()];
        let queries = vec!["SDHA_fp".to_string(), "Fumarate_red_C".to_string()];
        let scores = vec![
            vec![Some(502.3), None],
            vec![Some(41.7), Some(12.0)],
        ];
        plot_score_heatmap(&targets, &queries, &scores, &path)?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_plot_top_hits() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bars.png");
        let hits = vec![
            ("WBGene00003204.1".to_string(), 502.3),
            ("WBGene00006413.1".to_string(), 41.7),
        ];
        plot_top_hits(&hits, &path)?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_plot_empty_inputs_rejected() {
        let dir = tempdir().unwrap();
        assert!(plot_top_hits(&[], &dir.path().join("x.png")).is_err());
        assert!(
            plot_score_heatmap(&[], &[], &[], &dir.path().join("y.png")).is_err()
        );
    }
}
