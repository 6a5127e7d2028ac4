//! Simplex gradient noise, 2D and 3D, with fractal summation.
//!
//! All tables are fixed, read-only statics, so every function here is a pure
//! function of its arguments: the same coordinates always produce bit-identical
//! output, and generation workers can sample concurrently without any locking.

use once_cell::sync::Lazy;

const F2: f64 = 0.3660254037844386;
const G2: f64 = 0.21132486540518713;
const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

// Squared falloff radii per corner contribution.
const RADIUS_2D: f64 = 0.5;
const RADIUS_3D: f64 = 0.6;

// Output scale chosen so single-octave noise lands in [-1, 1].
const SCALE_2D: f64 = 70.0;
const SCALE_3D: f64 = 32.0;

/// The 12 edge-of-cube gradient directions.
const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209,
    76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198,
    173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44,
    154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79,
    113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12,
    191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29,
    24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

// Doubled so `PERM[i + 1 + PERM[j + 1]]`-style lookups never index past the
// table: every nested index stays below 512.
static PERM: Lazy<[usize; 512]> = Lazy::new(|| {
    let mut doubled = [0usize; 512];
    for (i, slot) in doubled.iter_mut().enumerate() {
        *slot = PERMUTATION[i & 255] as usize;
    }
    doubled
});

#[inline]
fn lattice(v: f64) -> usize {
    (v as i64 & 255) as usize
}

/// Single-octave 2D simplex noise in approximately [-1, 1].
pub fn simplex2(x: f64, y: f64) -> f64 {
    let s = (x + y) * F2;
    let i = (x + s).floor();
    let j = (y + s).floor();
    let t = (i + j) * G2;

    let x0 = x - (i - t);
    let y0 = y - (j - t);

    // Which triangle of the skewed cell we fell into decides the middle corner.
    let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

    let x1 = x0 - i1 as f64 + G2;
    let y1 = y0 - j1 as f64 + G2;
    let x2 = x0 + 2.0 * G2 - 1.0;
    let y2 = y0 + 2.0 * G2 - 1.0;

    let ii = lattice(i);
    let jj = lattice(j);
    let corners = [
        (PERM[ii + PERM[jj]] % 12, x0, y0),
        (PERM[ii + i1 + PERM[jj + j1]] % 12, x1, y1),
        (PERM[ii + 1 + PERM[jj + 1]] % 12, x2, y2),
    ];

    let mut total = 0.0;
    for (grad, dx, dy) in corners {
        let falloff = RADIUS_2D - dx * dx - dy * dy;
        if falloff > 0.0 {
            let g = GRAD3[grad];
            total += falloff * falloff * falloff * falloff * (g[0] * dx + g[1] * dy);
        }
    }
    total * SCALE_2D
}

/// Single-octave 3D simplex noise in approximately [-1, 1].
pub fn simplex3(x: f64, y: f64, z: f64) -> f64 {
    let s = (x + y + z) * F3;
    let i = (x + s).floor();
    let j = (y + s).floor();
    let k = (z + s).floor();
    let t = (i + j + k) * G3;

    let x0 = x - (i - t);
    let y0 = y - (j - t);
    let z0 = z - (k - t);

    // Rank the offsets to pick which two corners the simplex traverses between
    // the cell origin and its far corner.
    let (c1, c2) = if x0 >= y0 {
        if y0 >= z0 {
            ([1, 0, 0], [1, 1, 0])
        } else if x0 >= z0 {
            ([1, 0, 0], [1, 0, 1])
        } else {
            ([0, 0, 1], [1, 0, 1])
        }
    } else if y0 < z0 {
        ([0, 0, 1], [0, 1, 1])
    } else if x0 < z0 {
        ([0, 1, 0], [0, 1, 1])
    } else {
        ([0, 1, 0], [1, 1, 0])
    };

    let p0 = [x0, y0, z0];
    let mut p1 = [0.0; 3];
    let mut p2 = [0.0; 3];
    let mut p3 = [0.0; 3];
    for c in 0..3 {
        p1[c] = p0[c] - c1[c] as f64 + G3;
        p2[c] = p0[c] - c2[c] as f64 + 2.0 * G3;
        p3[c] = p0[c] - 1.0 + 3.0 * G3;
    }

    let ii = lattice(i);
    let jj = lattice(j);
    let kk = lattice(k);
    let corners = [
        (PERM[ii + PERM[jj + PERM[kk]]] % 12, p0),
        (PERM[ii + c1[0] + PERM[jj + c1[1] + PERM[kk + c1[2]]]] % 12, p1),
        (PERM[ii + c2[0] + PERM[jj + c2[1] + PERM[kk + c2[2]]]] % 12, p2),
        (PERM[ii + 1 + PERM[jj + 1 + PERM[kk + 1]]] % 12, p3),
    ];

    let mut total = 0.0;
    for (grad, p) in corners {
        let falloff = RADIUS_3D - p[0] * p[0] - p[1] * p[1] - p[2] * p[2];
        if falloff > 0.0 {
            let g = GRAD3[grad];
            let dot = g[0] * p[0] + g[1] * p[1] + g[2] * p[2];
            total += falloff * falloff * falloff * falloff * dot;
        }
    }
    total * SCALE_3D
}

/// Multi-octave 2D noise normalized to approximately [0, 1].
///
/// Octave 0 runs at amplitude 1 and frequency 1; each further octave scales
/// frequency by `lacunarity` and amplitude by `persistence`, and the running
/// maximum amplitude normalizes the sum.
pub fn fractal2(x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
    let mut freq = 1.0;
    let mut amp = 1.0;
    let mut max = 1.0;
    let mut total = simplex2(x, y);
    for _ in 1..octaves {
        freq *= lacunarity;
        amp *= persistence;
        max += amp;
        total += simplex2(x * freq, y * freq) * amp;
    }
    (1.0 + total / max) / 2.0
}

/// Multi-octave 3D noise normalized to approximately [0, 1].
pub fn fractal3(x: f64, y: f64, z: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
    let mut freq = 1.0;
    let mut amp = 1.0;
    let mut max = 1.0;
    let mut total = simplex3(x, y, z);
    for _ in 1..octaves {
        freq *= lacunarity;
        amp *= persistence;
        max += amp;
        total += simplex3(x * freq, y * freq, z * freq) * amp;
    }
    (1.0 + total / max) / 2.0
}
