//! Fixed periodic table lookup

/// Element symbols ordered by atomic number, `ELEMENTS[Z - 1]`
pub const ELEMENTS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", // 1-10
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", // 11-20
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", // 21-30
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", // 31-40
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", // 41-50
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", // 51-60
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", // 61-70
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", // 71-80
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", // 81-90
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", // 91-100
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", // 101-110
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og", // 111-118
];

/// Atomic number for an element symbol
///
/// The comparison ignores case, so `"fe"`, `"Fe"` and `"FE"` are all iron.
///
/// ```rust
/// # use actnet_nuclide::atomic_number;
/// assert_eq!(atomic_number("Fe"), Some(26));
/// assert_eq!(atomic_number("og"), Some(118));
/// assert_eq!(atomic_number("Xx"), None);
/// ```
pub fn atomic_number(symbol: &str) -> Option<u32> {
    ELEMENTS
        .iter()
        .position(|s| s.eq_ignore_ascii_case(symbol))
        .map(|i| i as u32 + 1)
}

/// Element symbol for an atomic number
///
/// ```rust
/// # use actnet_nuclide::symbol;
/// assert_eq!(symbol(1), Some("H"));
/// assert_eq!(symbol(26), Some("Fe"));
/// assert_eq!(symbol(0), None);
/// assert_eq!(symbol(119), None);
/// ```
pub fn symbol(z: u32) -> Option<&'static str> {
    match z {
        0 => None,
        _ => ELEMENTS.get(z as usize - 1).copied(),
    }
}
