//! Resolve table indices into exiftool tag assignments.

use filmscan_catalog::{camera_by_index, film_by_index, lens_by_index, Camera, Film, Lens};

use super::{TagError, TagRequest};

/// Tag values shared by every file in a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifOptions {
    pub camera: Option<&'static Camera>,
    pub lens: Option<&'static Lens>,
    pub film: Option<&'static Film>,
    pub iso: Option<u32>,
    pub aperture: Option<f64>,
}

/// `0` on any numeric field means "leave unset".
fn selected(value: Option<u32>) -> Option<u32> {
    value.filter(|&v| v != 0)
}

impl ExifOptions {
    /// Look up every requested index. Fails on the first unknown index.
    pub fn resolve(request: &TagRequest) -> Result<Self, TagError> {
        let camera = selected(request.camera).map(camera_by_index).transpose()?;
        let lens = selected(request.lens).map(lens_by_index).transpose()?;
        let film = selected(request.film).map(film_by_index).transpose()?;

        let iso = selected(request.iso).or_else(|| film.map(|f| f.iso));
        let aperture = request.aperture.filter(|&a| a != 0.0);

        Ok(Self {
            camera,
            lens,
            film,
            iso,
            aperture,
        })
    }

    /// Exiftool tag arguments for the resolved fields, in a fixed order.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(camera) = self.camera {
            args.push(format!("-Make={}", camera.make));
            args.push(format!("-Model={}", camera.model));
        }

        if let Some(lens) = self.lens {
            args.push(format!("-Lens={}", lens.description));
            if let Some(mm) = lens.focal_length {
                args.push(format!("-FocalLength={}", mm));
            }
        }

        if let Some(film) = self.film {
            args.push(format!("-HierarchicalSubject+=Film|{}", film.description));
        }

        if let Some(iso) = self.iso {
            args.push(format!("-ISO={}", iso));
        }

        if let Some(aperture) = self.aperture {
            args.push(format!("-FNumber={:.1}", aperture));
        }

        args
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmscan_catalog::{CatalogError, CAMERAS, FILMS, LENSES};

    fn request() -> TagRequest {
        TagRequest::default()
    }

    fn tag_names(args: &[String]) -> Vec<&str> {
        args.iter()
            .map(|a| a.split(['=', '+']).next().unwrap_or(a.as_str()))
            .collect()
    }

    #[test]
    fn test_nothing_requested() {
        let options = ExifOptions::resolve(&request()).unwrap();
        assert!(options.is_empty());
        assert!(options.args().is_empty());
    }

    #[test]
    fn test_zero_indices_mean_unset() {
        let req = TagRequest {
            camera: Some(0),
            lens: Some(0),
            film: Some(0),
            iso: Some(0),
            aperture: Some(0.0),
            ..request()
        };
        assert!(ExifOptions::resolve(&req).unwrap().args().is_empty());
    }

    #[test]
    fn test_full_request() {
        let req = TagRequest {
            camera: Some(1),
            lens: Some(2),
            film: Some(1),
            aperture: Some(2.8),
            ..request()
        };
        let args = ExifOptions::resolve(&req).unwrap().args();
        assert_eq!(
            args,
            [
                "-Make=Leica",
                "-Model=Leica M7",
                "-Lens=Leica Summicron-M 1:2/50",
                "-FocalLength=50",
                "-HierarchicalSubject+=Film|Kodak TRI-X 400",
                "-ISO=400",
                "-FNumber=2.8",
            ]
        );
    }

    #[test]
    fn test_only_requested_fields_for_every_index() {
        for camera in 1..=CAMERAS.len() as u32 {
            let req = TagRequest {
                camera: Some(camera),
                ..request()
            };
            let args = ExifOptions::resolve(&req).unwrap().args();
            assert_eq!(tag_names(&args), ["-Make", "-Model"]);
        }
        for lens in 1..=LENSES.len() as u32 {
            let req = TagRequest {
                lens: Some(lens),
                ..request()
            };
            let args = ExifOptions::resolve(&req).unwrap().args();
            assert_eq!(args[0].split('=').next(), Some("-Lens"));
            assert!(tag_names(&args)
                .iter()
                .all(|t| *t == "-Lens" || *t == "-FocalLength"));
        }
        for film in 1..=FILMS.len() as u32 {
            let req = TagRequest {
                film: Some(film),
                ..request()
            };
            let args = ExifOptions::resolve(&req).unwrap().args();
            assert_eq!(tag_names(&args), ["-HierarchicalSubject", "-ISO"]);
        }
    }

    #[test]
    fn test_zoom_lens_has_no_focal_length() {
        let req = TagRequest {
            lens: Some(9),
            ..request()
        };
        let args = ExifOptions::resolve(&req).unwrap().args();
        assert_eq!(args, ["-Lens=Minolta MD Zoom 28-70mm f/3.5-4.8"]);
    }

    #[test]
    fn test_film_iso_is_default() {
        let req = TagRequest {
            film: Some(6),
            ..request()
        };
        let options = ExifOptions::resolve(&req).unwrap();
        assert_eq!(options.iso, Some(1600));
    }

    #[test]
    fn test_iso_override_wins() {
        let req = TagRequest {
            film: Some(6),
            iso: Some(3200),
            ..request()
        };
        let args = ExifOptions::resolve(&req).unwrap().args();
        assert!(args.contains(&"-ISO=3200".to_string()));
        assert!(!args.contains(&"-ISO=1600".to_string()));
    }

    #[test]
    fn test_iso_without_film() {
        let req = TagRequest {
            iso: Some(200),
            ..request()
        };
        assert_eq!(ExifOptions::resolve(&req).unwrap().args(), ["-ISO=200"]);
    }

    #[test]
    fn test_aperture_one_decimal() {
        let req = TagRequest {
            aperture: Some(8.0),
            ..request()
        };
        assert_eq!(ExifOptions::resolve(&req).unwrap().args(), ["-FNumber=8.0"]);
    }

    #[test]
    fn test_unknown_index_fails() {
        let req = TagRequest {
            camera: Some(1),
            lens: Some(42),
            ..request()
        };
        match ExifOptions::resolve(&req) {
            Err(TagError::Catalog(CatalogError::UnknownLens { index: 42, .. })) => {}
            other => panic!("expected unknown lens, got {:?}", other),
        }
    }
}
