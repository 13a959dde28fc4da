use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::slots::{Grid, Paytable, Symbol, WinLine};

/// Выигрыш одной линии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineWin {
    pub line: WinLine,
    pub symbol: Symbol,
    pub amount: Chips,
}

/// Результат оценки сетки: выигравшие линии и их сумма.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridEvaluation {
    pub lines: Vec<LineWin>,
    pub total: Chips,
}

/// Символ линии, если все три ячейки совпадают.
pub fn line_symbol(grid: &Grid, line: WinLine) -> Option<Symbol> {
    let [a, b, c] = line.cells();
    let first = grid[a.0][a.1];
    (grid[b.0][b.1] == first && grid[c.0][c.1] == first).then_some(first)
}

/// Проверяем все 5 линий. Линии независимы и суммируются:
/// строка + диагональ с одним символом платят дважды.
pub fn evaluate_grid(grid: &Grid, bet: Chips, paytable: &Paytable) -> GridEvaluation {
    let mut eval = GridEvaluation::default();

    for line in WinLine::ALL {
        if let Some(symbol) = line_symbol(grid, line) {
            let amount = bet.times(paytable.multiplier(symbol));
            eval.total += amount;
            eval.lines.push(LineWin {
                line,
                symbol,
                amount,
            });
        }
    }

    eval
}
