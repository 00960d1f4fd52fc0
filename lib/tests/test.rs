use std::{collections::BTreeSet, error::Error};
use toruslife_lib::{Config, Error as LifeError, FormatError, Grid, Position, Rule};

const BLINKER: &str = "5 5\n\
                       0 0 0 0 0\n\
                       0 0 1 0 0\n\
                       0 0 1 0 0\n\
                       0 0 1 0 0\n\
                       0 0 0 0 0\n";

/// A glider moving towards the bottom right on a 20x20 torus.
fn glider() -> Result<Grid, Box<dyn Error>> {
    let mut grid = Grid::new(20, 20)?;
    for (row, col) in [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
        grid.set_alive(row, col, true);
    }
    Ok(grid)
}

fn assert_in_sync(grid: &Grid) {
    let (rows, cols) = grid.dimensions();
    let dense: BTreeSet<_> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .filter(|&(row, col)| grid.is_alive(row, col))
        .collect();
    let sparse: BTreeSet<_> = grid.live_cells().map(<(usize, usize)>::from).collect();
    assert_eq!(dense, sparse);
    assert_eq!(grid.live_count(), dense.len());
}

#[test]
fn standard_rule_table() {
    let rule = Rule::Standard;
    for count in 0..=8 {
        assert_eq!(rule.apply(true, count), count == 2 || count == 3);
        assert_eq!(rule.apply(false, count), count == 3);
    }
    assert!(!rule.apply(true, 9));
    assert!(!rule.apply(false, 100));
}

#[test]
fn rule_strings() -> Result<(), Box<dyn Error>> {
    assert_eq!("B3/S23".parse::<Rule>()?, Rule::Standard);
    assert_eq!(Rule::Standard.to_string(), "B3/S23");
    assert_eq!(Rule::default(), Rule::Standard);
    assert!(matches!(
        "B36/S23".parse::<Rule>(),
        Err(LifeError::UnsupportedRule(_))
    ));
    assert!(matches!(
        "not a rule".parse::<Rule>(),
        Err(LifeError::ParseRuleError(_))
    ));
    Ok(())
}

#[test]
fn load_from_str() -> Result<(), Box<dyn Error>> {
    let grid: Grid = "2 3\n0 1 0\n1 1 0\n".parse()?;
    assert_eq!(grid.dimensions(), (2, 3));
    assert_eq!(grid.live_count(), 3);
    assert!(grid.is_alive(0, 1));
    assert!(!grid.is_alive(0, 0));
    assert!(!grid.is_alive(5, 5));
    assert_eq!(grid.configuration_string(), "010110");
    assert_eq!(grid.history_len(), 1);
    assert_eq!(grid.generation(), 0);
    assert_in_sync(&grid);
    Ok(())
}

#[test]
fn only_one_means_alive() -> Result<(), Box<dyn Error>> {
    let grid: Grid = "1 4 1 2 -1 0 99".parse()?;
    assert_eq!(grid.configuration_string(), "1000");
    Ok(())
}

#[test]
fn invalid_sources() {
    let err = Grid::load("this/file/does/not/exist.txt").unwrap_err();
    assert!(err.is_invalid_format());
    assert!(matches!(
        err,
        LifeError::InvalidFormat(FormatError::Open { .. })
    ));

    assert!(matches!(
        "".parse::<Grid>(),
        Err(LifeError::InvalidFormat(FormatError::MissingDimensions))
    ));
    assert!(matches!(
        "0 3".parse::<Grid>(),
        Err(LifeError::InvalidFormat(FormatError::NonPositive { rows: 0, cols: 3 }))
    ));
    assert!(matches!(
        "3 -2".parse::<Grid>(),
        Err(LifeError::InvalidFormat(FormatError::NonPositive { .. }))
    ));
    assert!(matches!(
        "2 2\n1 0\n1".parse::<Grid>(),
        Err(LifeError::InvalidFormat(FormatError::MissingCells {
            expected: 4,
            found: 3
        }))
    ));
    assert!(matches!(
        "2 x".parse::<Grid>(),
        Err(LifeError::InvalidFormat(FormatError::InvalidToken(_)))
    ));
    assert!(matches!(
        "1 2 1 o".parse::<Grid>(),
        Err(LifeError::InvalidFormat(FormatError::InvalidToken(_)))
    ));
    assert!(Grid::new(0, 4).is_err());
    assert!(matches!(
        Grid::new(usize::MAX, 2),
        Err(LifeError::InvalidFormat(FormatError::TooLarge { cols: 2, .. }))
    ));
}

#[test]
fn from_reader() -> Result<(), Box<dyn Error>> {
    let grid = Grid::from_reader(BLINKER.as_bytes())?;
    assert_eq!(grid.dimensions(), (5, 5));
    assert_eq!(grid.live_count(), 3);
    Ok(())
}

#[test]
fn toroidal_wrap() -> Result<(), Box<dyn Error>> {
    let mut grid = Grid::new(5, 5)?;
    grid.set_alive(0, 0, true);
    let counts = grid.neighbor_counts();
    let expected: BTreeSet<_> = [
        (4, 4),
        (4, 0),
        (4, 1),
        (0, 4),
        (0, 1),
        (1, 4),
        (1, 0),
        (1, 1),
    ]
    .into_iter()
    .map(|(row, col)| Position::new(row, col))
    .collect();
    assert_eq!(counts.keys().copied().collect::<BTreeSet<_>>(), expected);
    assert!(counts.values().all(|&count| count == 1));
    Ok(())
}

#[test]
fn empty_grid_is_stable() -> Result<(), Box<dyn Error>> {
    let mut grid: Grid = "3 3\n0 0 0\n0 0 0\n0 0 0\n".parse()?;
    assert!(!grid.step());
    assert_eq!(grid.live_count(), 0);
    assert_eq!(grid.history_len(), 1);
    Ok(())
}

#[test]
fn dying_pattern_stabilizes_when_empty() -> Result<(), Box<dyn Error>> {
    let mut grid = Grid::new(6, 6)?;
    grid.set_alive(2, 2, true);
    assert!(grid.step());
    assert_eq!(grid.live_count(), 0);
    assert!(!grid.step());
    Ok(())
}

#[test]
fn block_is_stable() -> Result<(), Box<dyn Error>> {
    let mut grid: Grid = "4 4\n0 0 0 0\n0 1 1 0\n0 1 1 0\n0 0 0 0\n".parse()?;
    let before = grid.configuration_string();
    assert!(!grid.step());
    assert_eq!(grid.configuration_string(), before);
    assert_eq!(grid.generation(), 1);
    Ok(())
}

#[test]
fn blinker() -> Result<(), Box<dyn Error>> {
    let mut grid: Grid = BLINKER.parse()?;
    let vertical = grid.configuration_string();

    assert!(grid.step());
    assert_in_sync(&grid);
    assert_eq!(
        grid.configuration_string(),
        "00000\
         00000\
         01110\
         00000\
         00000"
    );
    assert_eq!(grid.history_len(), 2);

    // Back to the first phase.
    assert!(!grid.step());
    assert_in_sync(&grid);
    assert_eq!(grid.generation(), 2);
    assert_eq!(grid.configuration_string(), vertical);
    assert_eq!(grid.history_len(), 2);

    assert!(!grid.step());
    assert_eq!(grid.history_len(), 2);
    Ok(())
}

#[test]
fn glider_translation() -> Result<(), Box<dyn Error>> {
    let mut grid = glider()?;
    let initial = grid.configuration_string();
    for _ in 0..4 {
        assert!(grid.step());
        assert_in_sync(&grid);
    }
    assert_ne!(grid.configuration_string(), initial);
    let live: Vec<_> = grid.live_cells().map(<(usize, usize)>::from).collect();
    assert_eq!(live, vec![(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]);
    Ok(())
}

#[test]
fn glider_wraps_around() -> Result<(), Box<dyn Error>> {
    let mut grid = glider()?;
    let initial = grid.configuration_string();
    // 4 generations per diagonal move, 20 moves around the torus.
    for generation in 1..80 {
        assert!(grid.step(), "unexpected repetition at {}", generation);
        assert_eq!(grid.live_count(), 5);
    }
    assert!(!grid.step());
    assert_eq!(grid.configuration_string(), initial);
    assert_eq!(grid.history_len(), 80);
    Ok(())
}

#[test]
fn configuration_string_format() -> Result<(), Box<dyn Error>> {
    let mut grid = glider()?;
    for _ in 0..10 {
        let config = grid.configuration_string();
        assert_eq!(config.len(), 20 * 20);
        assert!(config.chars().all(|c| c == '0' || c == '1'));
        grid.step();
    }
    Ok(())
}

#[test]
fn tiny_torus() -> Result<(), Box<dyn Error>> {
    // Every neighbor of the only cell is the cell itself.
    let mut grid: Grid = "1 1 1".parse()?;
    assert_eq!(grid.neighbor_counts().get(&Position::new(0, 0)), Some(&8));
    assert!(grid.step());
    assert_eq!(grid.live_count(), 0);
    assert!(!grid.step());
    Ok(())
}

#[test]
fn editing_restarts_history() -> Result<(), Box<dyn Error>> {
    let mut grid: Grid = BLINKER.parse()?;
    grid.step();
    assert_eq!(grid.history_len(), 2);
    grid.set_alive(7, 7, true);
    assert!(grid.is_alive(2, 2));
    assert_eq!(grid.generation(), 0);
    assert_eq!(grid.history_len(), 1);
    assert_in_sync(&grid);
    grid.set_alive(2, 2, false);
    assert!(!grid.is_alive(2, 2));
    assert_in_sync(&grid);
    Ok(())
}

#[test]
fn plaintext() -> Result<(), Box<dyn Error>> {
    let grid: Grid = "2 3\n0 1 0\n1 1 0\n".parse()?;
    assert_eq!(grid.to_string(), ".o.\noo.\n");
    Ok(())
}

#[test]
fn config() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("blinker.txt");
    std::fs::write(&input, BLINKER)?;

    let config = Config::new(&input);
    assert_eq!(config.max_generations, 100);
    assert_eq!(config.rule_string, "B3/S23");
    assert!(config.save_snapshots);
    assert_eq!(config.output_dir, None);

    let grid = config.grid()?;
    assert_eq!(grid.rule(), Rule::Standard);
    assert_eq!(grid.live_count(), 3);

    let config = config.set_rule_string("B2/S");
    assert!(matches!(config.grid(), Err(LifeError::UnsupportedRule(_))));
    Ok(())
}
