use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::PropertyError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Name(Arc<str>),
    Index(usize),
}

impl PathSegment {
    pub fn name(&self) -> Option<&str> {
        match self {
            PathSegment::Name(name) => Some(name),
            PathSegment::Index(_) => None,
        }
    }
}

/// Ordered named/indexed segments locating a value inside a property container.
///
/// Text form: `style.paddingLeft.value`, `items[2].x`. A purely numeric dotted
/// segment (`items.2`) is read as an index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct PropertyPath {
    segments: SmallVec<[PathSegment; 4]>,
}

impl PropertyPath {
    pub fn parse(text: &str) -> Result<Self, PropertyError> {
        let invalid = || PropertyError::InvalidPath {
            path: text.to_string(),
            ty: "PropertyPath",
        };
        if text.is_empty() {
            return Err(invalid());
        }

        let mut segments: SmallVec<[PathSegment; 4]> = SmallVec::new();
        for part in text.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(at) => (&part[..at], &part[at..]),
                None => (part, ""),
            };

            if name.is_empty() {
                // `a.[1]` or a leading/trailing/double dot
                if rest.is_empty() || segments.is_empty() {
                    return Err(invalid());
                }
            } else if let Ok(index) = name.parse::<usize>() {
                segments.push(PathSegment::Index(index));
            } else {
                segments.push(PathSegment::Name(Arc::from(name)));
            }

            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(invalid)?;
                let index = rest[1..close].trim().parse::<usize>().map_err(|_| invalid())?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(invalid());
                }
            }
        }
        Ok(Self { segments })
    }

    /// Wire keys spell nesting with dashes (`style-flexGrow-value`).
    pub fn from_wire_key(key: &str) -> Result<Self, PropertyError> {
        if key.contains('-') {
            Self::parse(&key.replace('-', "."))
        } else {
            Self::parse(key)
        }
    }

    pub fn from_segments<I: IntoIterator<Item = PathSegment>>(segments: I) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last named segment, ignoring trailing indices.
    pub fn last_name(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(PathSegment::name)
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }
}

impl FromStr for PropertyPath {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Name(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Name(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
