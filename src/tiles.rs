// ── TileKind ────────────────────────────────────────────────────────────────

/// Every tile kind a level file can reference.
///
/// The digit codes follow the numeric keypad: `7 8 9` are the top shoreline
/// edge, `4` / `6` the sides and `1 2 3` the bottom edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    Grass,
    Water,
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl TileKind {
    pub const ALL: [TileKind; 10] = [
        TileKind::Grass,
        TileKind::Water,
        TileKind::TopLeft,
        TileKind::Top,
        TileKind::TopRight,
        TileKind::Left,
        TileKind::Right,
        TileKind::BottomLeft,
        TileKind::Bottom,
        TileKind::BottomRight,
    ];

    /// Look up the kind for a level-file character.  `None` for anything
    /// outside the table.
    pub fn from_code(code: char) -> Option<Self> {
        let kind = match code {
            'G' => TileKind::Grass,
            'W' => TileKind::Water,
            '7' => TileKind::TopLeft,
            '8' => TileKind::Top,
            '9' => TileKind::TopRight,
            '4' => TileKind::Left,
            '6' => TileKind::Right,
            '1' => TileKind::BottomLeft,
            '2' => TileKind::Bottom,
            '3' => TileKind::BottomRight,
            _ => return None,
        };
        Some(kind)
    }

    pub fn code(self) -> char {
        match self {
            TileKind::Grass => 'G',
            TileKind::Water => 'W',
            TileKind::TopLeft => '7',
            TileKind::Top => '8',
            TileKind::TopRight => '9',
            TileKind::Left => '4',
            TileKind::Right => '6',
            TileKind::BottomLeft => '1',
            TileKind::Bottom => '2',
            TileKind::BottomRight => '3',
        }
    }

    /// Symbolic image name, as used for keys in the tile manifest.
    pub fn name(self) -> &'static str {
        match self {
            TileKind::Grass => "grassTile",
            TileKind::Water => "waterTile",
            TileKind::TopLeft => "topLeft",
            TileKind::Top => "top",
            TileKind::TopRight => "topRight",
            TileKind::Left => "left",
            TileKind::Right => "right",
            TileKind::BottomLeft => "bottomLeft",
            TileKind::Bottom => "bottom",
            TileKind::BottomRight => "bottomRight",
        }
    }
}

/// Map a tile code straight to its symbolic image name.
pub fn resolve(code: char) -> Option<&'static str> {
    TileKind::from_code(code).map(TileKind::name)
}
