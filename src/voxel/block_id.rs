/// Block identifier registry
/// The set of block types is closed and generated from the table below;
/// `BlockId::Empty` is the reserved "no solid voxel" sentinel.
/// u16 representation so every id fits the mesher's 14-bit vertex field.

/// Generates the `BlockId` enum plus its lookup tables from a static table.
/// Adding a block type is a one-line change here; the mesher's compile-time
/// capacity check guards the total count.
macro_rules! block_registry {
    ($($name:ident = $value:literal),+ $(,)?) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum BlockId {
            $($name = $value),+
        }

        /// Number of distinct block ids, sentinel included.
        pub const BLOCK_ID_COUNT: usize = [$($value),+].len();

        impl BlockId {
            pub const ALL: [BlockId; BLOCK_ID_COUNT] = [$(BlockId::$name),+];

            /// Convert from the raw u16 representation.
            /// Unknown values map to `Empty` rather than panicking so that
            /// decoded GPU data can never produce an out-of-range id.
            #[inline]
            pub const fn from_u16(value: u16) -> Self {
                match value {
                    $($value => BlockId::$name,)+
                    _ => BlockId::Empty,
                }
            }
        }
    };
}

block_registry! {
    Empty = 0,
    Stone = 1,
    Dirt = 2,
    Grass = 3,
    Sand = 4,
    Gravel = 5,
    Snow = 6,
    Water = 7,
    Bedrock = 8,
}

impl BlockId {
    /// A voxel participates in meshing iff it is not the empty sentinel.
    #[inline]
    pub const fn is_solid(self) -> bool {
        !matches!(self, BlockId::Empty)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, BlockId::Empty)
    }
}

impl Default for BlockId {
    fn default() -> Self {
        BlockId::Empty
    }
}
