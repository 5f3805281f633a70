/// Bit-packed GPU vertex layout
/// This is a hard contract with the vertex shader: two little-endian u32
/// words, 8 bytes per vertex. Field widths and order must only change in
/// lockstep with the GPU side.
///
/// Word 0 (position, render-area-local voxel coordinates):
///   bits  0..11  x (11 bits)
///   bits 11..22  y (11 bits)
///   bits 22..32  z (10 bits)
/// Word 1 (material):
///   bits  0..9   u (9 bits, quad-local texture coordinate)
///   bits  9..18  v (9 bits)
///   bits 18..32  block id (14 bits)
///
/// Packing is explicit shift/mask arithmetic rather than bit-field structs so
/// the byte layout is portable.
use crate::voxel::{BlockId, BLOCK_ID_COUNT, CHUNK_HEIGHT, CHUNK_WIDTH};
use bytemuck::{Pod, Zeroable};
use thiserror::Error;

pub const POS_X_BITS: u32 = 11;
pub const POS_Y_BITS: u32 = 11;
pub const POS_Z_BITS: u32 = 10;
pub const TEX_U_BITS: u32 = 9;
pub const TEX_V_BITS: u32 = 9;
pub const BLOCK_ID_BITS: u32 = 14;

const POS_Y_SHIFT: u32 = POS_X_BITS;
const POS_Z_SHIFT: u32 = POS_X_BITS + POS_Y_BITS;
const TEX_V_SHIFT: u32 = TEX_U_BITS;
const BLOCK_ID_SHIFT: u32 = TEX_U_BITS + TEX_V_BITS;

#[inline]
const fn field_mask(bits: u32) -> u32 {
    (1u32 << bits) - 1
}

// Each word must be exactly filled; a silent gap or overlap here would shift
// every downstream field.
const _: () = assert!(POS_X_BITS + POS_Y_BITS + POS_Z_BITS == 32);
const _: () = assert!(TEX_U_BITS + TEX_V_BITS + BLOCK_ID_BITS == 32);

// Every block id must be representable in the material word.
const _: () = assert!(BLOCK_ID_COUNT <= 1 << BLOCK_ID_BITS);

// Vertex coordinates are inclusive of the far quad corner, so the vertical
// extent itself must be encodable, as must every quad dimension in u/v.
const _: () = assert!(CHUNK_HEIGHT <= field_mask(POS_Z_BITS) as usize);
const _: () = assert!(CHUNK_HEIGHT <= field_mask(TEX_U_BITS) as usize);
const _: () = assert!(CHUNK_HEIGHT <= field_mask(TEX_V_BITS) as usize);

/// Largest render distance whose render-area width `CHUNK_WIDTH * (2R + 1)`
/// still fits the horizontal position fields. Regions are bounded by this and
/// the default render distance is checked against it at compile time.
pub const MAX_RENDER_DISTANCE: i32 = {
    let max_coord = field_mask(POS_X_BITS) as i32;
    let max_window = max_coord / CHUNK_WIDTH as i32;
    (max_window - 1) / 2
};
const _: () = assert!(MAX_RENDER_DISTANCE >= 1);

/// A field value did not fit its bit width. The meshing path can never hit
/// this (capacities are checked at compile time); it exists for callers
/// packing vertices by hand and for tests.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("vertex field {field} value {value} exceeds {bits} bits")]
pub struct EncodingOverflow {
    pub field: &'static str,
    pub value: u32,
    pub bits: u32,
}

/// One bit-packed vertex, ready for GPU submission.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedVertex {
    pub position: u32,
    pub material: u32,
}

impl PackedVertex {
    /// Pack a vertex. Out-of-range fields are a programmer error (fatal in
    /// debug builds); use `try_new` when inputs are not statically bounded.
    #[inline]
    pub fn new(x: u32, y: u32, z: u32, u: u32, v: u32, block: BlockId) -> Self {
        debug_assert!(x <= field_mask(POS_X_BITS));
        debug_assert!(y <= field_mask(POS_Y_BITS));
        debug_assert!(z <= field_mask(POS_Z_BITS));
        debug_assert!(u <= field_mask(TEX_U_BITS));
        debug_assert!(v <= field_mask(TEX_V_BITS));

        Self {
            position: x | (y << POS_Y_SHIFT) | (z << POS_Z_SHIFT),
            material: u | (v << TEX_V_SHIFT) | ((block as u32) << BLOCK_ID_SHIFT),
        }
    }

    /// Checked variant of `new`.
    pub fn try_new(
        x: u32,
        y: u32,
        z: u32,
        u: u32,
        v: u32,
        block: BlockId,
    ) -> Result<Self, EncodingOverflow> {
        let check = |field, value, bits| {
            if value > field_mask(bits) {
                Err(EncodingOverflow { field, value, bits })
            } else {
                Ok(())
            }
        };
        check("x", x, POS_X_BITS)?;
        check("y", y, POS_Y_BITS)?;
        check("z", z, POS_Z_BITS)?;
        check("u", u, TEX_U_BITS)?;
        check("v", v, TEX_V_BITS)?;
        Ok(Self::new(x, y, z, u, v, block))
    }

    #[inline]
    pub const fn x(self) -> u32 {
        self.position & field_mask(POS_X_BITS)
    }

    #[inline]
    pub const fn y(self) -> u32 {
        (self.position >> POS_Y_SHIFT) & field_mask(POS_Y_BITS)
    }

    #[inline]
    pub const fn z(self) -> u32 {
        (self.position >> POS_Z_SHIFT) & field_mask(POS_Z_BITS)
    }

    #[inline]
    pub const fn tex_u(self) -> u32 {
        self.material & field_mask(TEX_U_BITS)
    }

    #[inline]
    pub const fn tex_v(self) -> u32 {
        (self.material >> TEX_V_SHIFT) & field_mask(TEX_V_BITS)
    }

    #[inline]
    pub const fn block_id(self) -> BlockId {
        BlockId::from_u16(((self.material >> BLOCK_ID_SHIFT) & field_mask(BLOCK_ID_BITS)) as u16)
    }
}
