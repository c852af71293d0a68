use std::fmt;
use std::str::FromStr;

use super::error::{Error, Result};

/// The smallest icon size supported in a template.
pub const MIN_ICON_SIZE: u32 = 1;

/// The largest icon size supported in a template.
pub const MAX_ICON_SIZE: u32 = 1024;

// See http://iconhandbook.co.uk/reference/chart/ for the platform charts.
const SIZES_WINDOWS: &[u32] = &[256, 128, 96, 64, 48, 32, 24, 16];
const SIZES_MACOS: &[u32] = &[1024, 512, 256, 128, 64, 48, 32, 16];
const SIZES_FAVICON: &[u32] = &[228, 152, 144, 120, 96, 72, 64, 32, 24, 16];
const SIZES_ANDROID: &[u32] = &[192, 144, 96, 72, 64, 48, 36, 32, 24, 16];
const SIZES_IOS: &[u32] = &[180, 152, 120, 87, 80, 76, 58, 40, 29];

/// A target platform, each with a fixed list of required icon sizes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Platform {
    /// Windows application icons.
    Windows,
    /// macOS application icons.
    MacOs,
    /// Website favicons for multiple devices.
    Favicon,
    /// Android launcher, action, and dialog icons.
    Android,
    /// iOS app, settings, and spotlight icons.
    Ios,
}

impl Platform {
    /// All supported platforms.
    pub const ALL: [Platform; 5] = [
        Platform::Windows,
        Platform::MacOs,
        Platform::Favicon,
        Platform::Android,
        Platform::Ios,
    ];

    /// Returns the required icon sizes for this platform, largest first.
    ///
    /// # Examples
    /// ```
    /// use iconpack::Platform;
    /// assert_eq!(Platform::Windows.sizes()[0], 256);
    /// assert_eq!(Platform::Ios.sizes().len(), 9);
    /// ```
    pub fn sizes(self) -> &'static [u32] {
        match self {
            Platform::Windows => SIZES_WINDOWS,
            Platform::MacOs => SIZES_MACOS,
            Platform::Favicon => SIZES_FAVICON,
            Platform::Android => SIZES_ANDROID,
            Platform::Ios => SIZES_IOS,
        }
    }

    /// Returns the platform with the given number, as used on the command
    /// line (1 = Windows, 2 = Favicon, 3 = Android, 4 = iOS, 5 = macOS).
    pub fn from_number(number: u32) -> Result<Platform> {
        match number {
            1 => Ok(Platform::Windows),
            2 => Ok(Platform::Favicon),
            3 => Ok(Platform::Android),
            4 => Ok(Platform::Ios),
            5 => Ok(Platform::MacOs),
            _ => Err(Error::UnknownPlatform(number.to_string())),
        }
    }

    /// Returns the lowercase name of this platform.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Favicon => "favicon",
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        out.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(input: &str) -> Result<Platform> {
        let name = input.trim().to_ascii_lowercase();
        if let Ok(number) = name.parse::<u32>() {
            return Platform::from_number(number);
        }
        match name.as_str() {
            "windows" | "win" => Ok(Platform::Windows),
            "macos" | "mac" | "osx" => Ok(Platform::MacOs),
            "favicon" | "web" => Ok(Platform::Favicon),
            "android" => Ok(Platform::Android),
            "ios" => Ok(Platform::Ios),
            _ => Err(Error::UnknownPlatform(input.to_string())),
        }
    }
}

/// Looks up the required icon sizes for a platform by name or number.
pub fn sizes_for(platform: &str) -> Result<&'static [u32]> {
    Ok(platform.parse::<Platform>()?.sizes())
}

/// Checks that a custom list of sizes can be used as a pack template: it
/// must be non-empty, each size must be within range, and no size may
/// appear twice.
pub fn validate_sizes(sizes: &[u32]) -> Result<()> {
    if sizes.is_empty() {
        return Err(Error::InvalidTemplate("no sizes given".to_string()));
    }
    for (index, &size) in sizes.iter().enumerate() {
        if size < MIN_ICON_SIZE || size > MAX_ICON_SIZE {
            let msg = format!("size {} is out of range ({}-{})",
                              size,
                              MIN_ICON_SIZE,
                              MAX_ICON_SIZE);
            return Err(Error::InvalidTemplate(msg));
        }
        if sizes[..index].contains(&size) {
            let msg = format!("size {} appears more than once", size);
            return Err(Error::InvalidTemplate(msg));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_templates_are_valid() {
        for platform in &Platform::ALL {
            let sizes = platform.sizes();
            validate_sizes(sizes).expect("invalid builtin template");
            assert!(sizes.len() >= 8 && sizes.len() <= 10);
            assert!(sizes.windows(2).all(|pair| pair[0] > pair[1]),
                    "{} is not largest-first",
                    platform);
        }
    }

    #[test]
    fn windows_sizes() {
        assert_eq!(Platform::Windows.sizes(),
                   &[256, 128, 96, 64, 48, 32, 24, 16]);
    }

    #[test]
    fn platform_from_str() {
        assert_eq!("Windows".parse::<Platform>().unwrap(), Platform::Windows);
        assert_eq!("macos".parse::<Platform>().unwrap(), Platform::MacOs);
        assert_eq!("4".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!(sizes_for("android").unwrap()[0], 192);
    }

    #[test]
    fn unknown_platform() {
        match "amiga".parse::<Platform>() {
            Err(Error::UnknownPlatform(name)) => assert_eq!(name, "amiga"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(Platform::from_number(0),
                         Err(Error::UnknownPlatform(_))));
        assert!(sizes_for("9").is_err());
    }

    #[test]
    fn invalid_custom_sizes() {
        assert!(validate_sizes(&[]).is_err());
        assert!(validate_sizes(&[0, 16]).is_err());
        assert!(validate_sizes(&[2048]).is_err());
        assert!(validate_sizes(&[32, 16, 32]).is_err());
        assert!(validate_sizes(&[300, 20, 1]).is_ok());
    }
}
