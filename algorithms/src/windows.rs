pub trait WindowsExt<T> {
    fn array_windows_ext<const N: usize>(&self) -> WindowsIter<'_, T, N>;
}

impl<T> WindowsExt<T> for [T] {
    fn array_windows_ext<const N: usize>(&self) -> WindowsIter<'_, T, N> {
        WindowsIter { slice: self }
    }
}

pub struct WindowsIter<'a, T, const N: usize> {
    slice: &'a [T],
}

impl<'a, T, const N: usize> Iterator for WindowsIter<'a, T, N> {
    type Item = &'a [T; N];

    fn next(&mut self) -> Option<Self::Item> {
        let window = self.slice.first_chunk::<N>()?;
        if N > 0 {
            self.slice = &self.slice[1..];
        }
        Some(window)
    }
}
