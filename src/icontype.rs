use std::fmt;
use std::str::FromStr;

/// Types of PNG-bearing icon elements that can be read from ICNS files.
///
/// Only the eight "canonical" types, one per supported pixel size, are ever
/// written; the remaining types are older or duplicate encodings that are
/// accepted on input.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IconType {
    /// 16x16 32-bit icon (`icp4`).
    RGBA32_16x16,
    /// 16x16 32-bit icon at 2x "retina" density, so 32 by 32 pixels
    /// (`ic11`).
    RGBA32_16x16_2x,
    /// 24x24 32-bit icon at 2x "retina" density, so 48 by 48 pixels
    /// (`SB24`).
    RGBA32_24x24_2x,
    /// 32x32 32-bit icon at 2x "retina" density, so 64 by 64 pixels
    /// (`ic12`).
    RGBA32_32x32_2x,
    /// 128x128 32-bit icon (`ic07`).
    RGBA32_128x128,
    /// 128x128 32-bit icon at 2x "retina" density, so 256 by 256 pixels
    /// (`ic13`).
    RGBA32_128x128_2x,
    /// 256x256 32-bit icon at 2x "retina" density, so 512 by 512 pixels
    /// (`ic14`).
    RGBA32_256x256_2x,
    /// 512x512 32-bit icon at 2x "retina" density, so 1024 by 1024 pixels
    /// (`ic10`).
    RGBA32_512x512_2x,
    /// 16x16 32-bit icon, read only (`ic04`).
    ARGB32_16x16,
    /// 18x18 32-bit icon, read only (`icsb`).
    RGBA32_18x18,
    /// 24x24 32-bit icon, read only (`sb24`).
    RGBA32_24x24,
    /// 32x32 32-bit icon, read only (`icp5`).
    RGBA32_32x32,
    /// 32x32 32-bit icon, read only (`ic05`).
    ARGB32_32x32,
    /// 18x18 32-bit icon at 2x "retina" density, read only (`icsB`).
    RGBA32_18x18_2x,
    /// 64x64 32-bit icon, read only (`icp6`).
    RGBA32_64x64,
    /// 256x256 32-bit icon, read only (`ic08`).
    RGBA32_256x256,
    /// 512x512 32-bit icon, read only (`ic09`).
    RGBA32_512x512,
}

/// The types written by this library, largest first.
const CANONICAL_TYPES: [IconType; 8] = [
    IconType::RGBA32_512x512_2x,
    IconType::RGBA32_256x256_2x,
    IconType::RGBA32_128x128_2x,
    IconType::RGBA32_128x128,
    IconType::RGBA32_32x32_2x,
    IconType::RGBA32_24x24_2x,
    IconType::RGBA32_16x16_2x,
    IconType::RGBA32_16x16,
];

impl IconType {
    /// Get the icon type associated with the given OSType, if any.
    pub fn from_ostype(ostype: OSType) -> Option<IconType> {
        let OSType(raw_ostype) = ostype;
        match &raw_ostype {
            b"icp4" => Some(IconType::RGBA32_16x16),
            b"ic11" => Some(IconType::RGBA32_16x16_2x),
            b"SB24" => Some(IconType::RGBA32_24x24_2x),
            b"ic12" => Some(IconType::RGBA32_32x32_2x),
            b"ic07" => Some(IconType::RGBA32_128x128),
            b"ic13" => Some(IconType::RGBA32_128x128_2x),
            b"ic14" => Some(IconType::RGBA32_256x256_2x),
            b"ic10" => Some(IconType::RGBA32_512x512_2x),
            b"ic04" => Some(IconType::ARGB32_16x16),
            b"icsb" => Some(IconType::RGBA32_18x18),
            b"sb24" => Some(IconType::RGBA32_24x24),
            b"icp5" => Some(IconType::RGBA32_32x32),
            b"ic05" => Some(IconType::ARGB32_32x32),
            b"icsB" => Some(IconType::RGBA32_18x18_2x),
            b"icp6" => Some(IconType::RGBA32_64x64),
            b"ic08" => Some(IconType::RGBA32_256x256),
            b"ic09" => Some(IconType::RGBA32_512x512),
            _ => None,
        }
    }

    /// Get the OSType that represents this icon type.
    pub fn ostype(self) -> OSType {
        match self {
            IconType::RGBA32_16x16 => OSType(*b"icp4"),
            IconType::RGBA32_16x16_2x => OSType(*b"ic11"),
            IconType::RGBA32_24x24_2x => OSType(*b"SB24"),
            IconType::RGBA32_32x32_2x => OSType(*b"ic12"),
            IconType::RGBA32_128x128 => OSType(*b"ic07"),
            IconType::RGBA32_128x128_2x => OSType(*b"ic13"),
            IconType::RGBA32_256x256_2x => OSType(*b"ic14"),
            IconType::RGBA32_512x512_2x => OSType(*b"ic10"),
            IconType::ARGB32_16x16 => OSType(*b"ic04"),
            IconType::RGBA32_18x18 => OSType(*b"icsb"),
            IconType::RGBA32_24x24 => OSType(*b"sb24"),
            IconType::RGBA32_32x32 => OSType(*b"icp5"),
            IconType::ARGB32_32x32 => OSType(*b"ic05"),
            IconType::RGBA32_18x18_2x => OSType(*b"icsB"),
            IconType::RGBA32_64x64 => OSType(*b"icp6"),
            IconType::RGBA32_256x256 => OSType(*b"ic08"),
            IconType::RGBA32_512x512 => OSType(*b"ic09"),
        }
    }

    /// Returns the canonical icon type used to write an image with the
    /// given pixel size, if there is one.
    ///
    /// # Examples
    /// ```
    /// use iconpack::IconType;
    /// assert_eq!(IconType::from_pixel_size(32),
    ///            Some(IconType::RGBA32_16x16_2x));
    /// assert_eq!(IconType::from_pixel_size(96), None);
    /// ```
    pub fn from_pixel_size(size: u32) -> Option<IconType> {
        CANONICAL_TYPES.iter().cloned().find(|icon_type| {
            icon_type.pixel_size() == size
        })
    }

    /// Returns true if this is the type written for its pixel size.
    pub fn is_canonical(self) -> bool {
        CANONICAL_TYPES.contains(&self)
    }

    /// Returns the pixel width (and height) of this icon type.  Normally
    /// this is the same as the screen size, but for 2x "retina" density
    /// icons, this will be twice that value.
    ///
    /// # Examples
    /// ```
    /// use iconpack::IconType;
    /// assert_eq!(IconType::RGBA32_128x128.pixel_size(), 128);
    /// assert_eq!(IconType::RGBA32_128x128_2x.pixel_size(), 256);
    /// ```
    pub fn pixel_size(self) -> u32 {
        self.screen_size() * self.pixel_density()
    }

    /// Returns the pixel density for this icon type -- that is, 2 for 2x
    /// "retina" density icons, or 1 for other icon types.
    pub fn pixel_density(self) -> u32 {
        match self {
            IconType::RGBA32_16x16_2x |
            IconType::RGBA32_18x18_2x |
            IconType::RGBA32_24x24_2x |
            IconType::RGBA32_32x32_2x |
            IconType::RGBA32_128x128_2x |
            IconType::RGBA32_256x256_2x |
            IconType::RGBA32_512x512_2x => 2,
            _ => 1,
        }
    }

    /// Returns the screen width (and height) of this icon type.
    pub fn screen_size(self) -> u32 {
        match self {
            IconType::RGBA32_16x16 |
            IconType::RGBA32_16x16_2x |
            IconType::ARGB32_16x16 => 16,
            IconType::RGBA32_18x18 |
            IconType::RGBA32_18x18_2x => 18,
            IconType::RGBA32_24x24 |
            IconType::RGBA32_24x24_2x => 24,
            IconType::RGBA32_32x32 |
            IconType::RGBA32_32x32_2x |
            IconType::ARGB32_32x32 => 32,
            IconType::RGBA32_64x64 => 64,
            IconType::RGBA32_128x128 |
            IconType::RGBA32_128x128_2x => 128,
            IconType::RGBA32_256x256 |
            IconType::RGBA32_256x256_2x => 256,
            IconType::RGBA32_512x512 |
            IconType::RGBA32_512x512_2x => 512,
        }
    }
}

/// A Macintosh OSType (also known as a ResType), used in ICNS files to
/// identify the type of each icon element.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OSType(pub [u8; 4]);

impl fmt::Display for OSType {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        let &OSType(raw) = self;
        for &byte in &raw {
            write!(out, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl FromStr for OSType {
    type Err = String;

    fn from_str(input: &str) -> Result<OSType, String> {
        let bytes = input.as_bytes();
        if bytes.len() != 4 {
            Err(format!("OSType string must be 4 bytes (was {})", bytes.len()))
        } else {
            let mut raw = [0u8; 4];
            raw.clone_from_slice(bytes);
            Ok(OSType(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const ALL_TYPES: [IconType; 17] = [IconType::RGBA32_16x16,
                                       IconType::RGBA32_16x16_2x,
                                       IconType::RGBA32_24x24_2x,
                                       IconType::RGBA32_32x32_2x,
                                       IconType::RGBA32_128x128,
                                       IconType::RGBA32_128x128_2x,
                                       IconType::RGBA32_256x256_2x,
                                       IconType::RGBA32_512x512_2x,
                                       IconType::ARGB32_16x16,
                                       IconType::RGBA32_18x18,
                                       IconType::RGBA32_24x24,
                                       IconType::RGBA32_32x32,
                                       IconType::ARGB32_32x32,
                                       IconType::RGBA32_18x18_2x,
                                       IconType::RGBA32_64x64,
                                       IconType::RGBA32_256x256,
                                       IconType::RGBA32_512x512];

    #[test]
    fn icon_type_ostype_round_trip() {
        for icon_type in &ALL_TYPES {
            let ostype = icon_type.ostype();
            let from = IconType::from_ostype(ostype);
            assert_eq!(Some(*icon_type), from);
        }
    }

    #[test]
    fn canonical_size_table() {
        let table = [(16, "icp4"),
                     (32, "ic11"),
                     (48, "SB24"),
                     (64, "ic12"),
                     (128, "ic07"),
                     (256, "ic13"),
                     (512, "ic14"),
                     (1024, "ic10")];
        for &(size, ostype) in &table {
            let icon_type = IconType::from_pixel_size(size).unwrap();
            assert_eq!(icon_type.ostype().to_string(), ostype);
            assert!(icon_type.is_canonical());
        }
        assert_eq!(ALL_TYPES.iter().filter(|t| t.is_canonical()).count(), 8);
    }

    #[test]
    fn aliases_are_not_canonical() {
        let alias = IconType::from_ostype(OSType(*b"ic08")).unwrap();
        assert!(!alias.is_canonical());
        assert_eq!(alias.pixel_size(), 256);
        let alias = IconType::from_ostype(OSType(*b"icp5")).unwrap();
        assert_eq!(alias.pixel_size(), 32);
        assert_eq!(IconType::RGBA32_18x18_2x.pixel_size(), 36);
    }

    #[test]
    fn unknown_ostype() {
        assert_eq!(IconType::from_ostype(OSType(*b"is32")), None);
        assert_eq!(IconType::from_ostype(OSType(*b"TOC ")), None);
    }

    #[test]
    fn ostype_to_and_from_str() {
        let ostype = OSType::from_str("abcd").expect("failed to parse OSType");
        assert_eq!(ostype.to_string(), "abcd".to_string());
    }

    #[test]
    fn ostype_from_str_failure() {
        assert_eq!(OSType::from_str("abc"),
                   Err("OSType string must be 4 bytes (was 3)".to_string()));
        assert_eq!(OSType::from_str("abcde"),
                   Err("OSType string must be 4 bytes (was 5)".to_string()));
    }
}
